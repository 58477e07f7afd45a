//! UI components for Eventdesk
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod configurations;
pub mod login;
pub mod run_report;
pub mod settings;

use crate::app::AppState;
use crate::nav::Screen;
use crate::ui::configurations::{ConfigurationEditor, ConfigurationsScreen};
use crate::ui::login::LoginScreen;
use crate::ui::run_report::RunReportScreen;
use crate::ui::settings::SettingsScreen;
use dioxus::prelude::*;

/// Main application layout
#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let theme = app_state.settings.read().theme.clone();
    let current = app_state.history.read().current().clone();

    rsx! {
        // Theme wrapper
        div {
            "data-theme": "{theme}",
            class: "app-shell",

            link { rel: "stylesheet", href: "assets/styles.css" }

            if current != Screen::Login {
                Topbar {}
            }

            main { class: "app-main",
                match current {
                    Screen::Login => rsx! { LoginScreen {} },
                    Screen::Configurations => rsx! { ConfigurationsScreen {} },
                    Screen::Configuration(id) => rsx! { ConfigurationEditor { id } },
                    Screen::Run(configuration_id, run_id) => rsx! {
                        RunReportScreen { configuration_id, run_id }
                    },
                    Screen::Settings => rsx! { SettingsScreen {} },
                }
            }
        }
    }
}

fn Topbar() -> Element {
    let app_state = use_context::<AppState>();
    let mut history = app_state.history;
    let current = history.read().current().clone();
    let can_go_back = history.read().can_go_back();

    rsx! {
        header { class: "topbar",
            button {
                class: "btn btn-ghost topbar-back",
                disabled: !can_go_back,
                title: "Back",
                onclick: move |_| {
                    history.write().back();
                },
                svg { width: "16", height: "16", view_box: "0 0 24 24", fill: "none", stroke: "currentColor", stroke_width: "2", stroke_linecap: "round", stroke_linejoin: "round", path { d: "M15 18l-6-6 6-6" } }
            }
            span { class: "topbar-brand", "Eventdesk" }
            nav { class: "topbar-nav",
                button {
                    class: if matches!(current, Screen::Configurations | Screen::Configuration(_) | Screen::Run(..)) { "topbar-link active" } else { "topbar-link" },
                    onclick: move |_| history.write().push(Screen::Configurations),
                    "Configurations"
                }
                button {
                    class: if current == Screen::Settings { "topbar-link active" } else { "topbar-link" },
                    onclick: move |_| history.write().push(Screen::Settings),
                    "Settings"
                }
            }
        }
    }
}

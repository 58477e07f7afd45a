//! Signed-out screen
//!
//! Shown when the server answers a request with 401. The status hook in
//! [`crate::app`] replaces the current history entry with this screen, so
//! going back can never land on the page that was denied.

use crate::app::AppState;
use crate::nav::Screen;
use dioxus::prelude::*;

pub fn LoginScreen() -> Element {
    let app_state = use_context::<AppState>();
    let mut history = app_state.history;
    let server_url = app_state.settings.read().server_url.clone();

    rsx! {
        div { class: "login-screen",
            div { class: "login-card",
                h1 { "Signed out" }
                p { "The server at {server_url} rejected the last request." }
                p { class: "text-secondary",
                    "Sign in on the server, then try again."
                }
                div { class: "button-row",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| history.write().replace(Screen::Configurations),
                        "Back to configurations"
                    }
                    button {
                        class: "btn btn-ghost",
                        onclick: move |_| history.write().push(Screen::Settings),
                        "Open settings"
                    }
                }
            }
        }
    }
}

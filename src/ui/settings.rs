//! Settings screen
//!
//! Server address, theme and language. Changes are persisted immediately;
//! applying a new server address also rebuilds the API client.

use crate::app::AppState;
use crate::storage::settings::save_settings;
use dioxus::prelude::*;

pub fn SettingsScreen() -> Element {
    let app_state = use_context::<AppState>();
    let settings = app_state.settings.read().clone();
    let dark_mode = settings.theme == "dark";

    let mut draft_url = use_signal(|| settings.server_url.clone());
    let mut app_state_server = app_state.clone();
    let mut settings_theme = app_state.settings;
    let mut settings_language = app_state.settings;

    let on_apply = move |_| {
        {
            let mut settings = app_state_server.settings.write();
            settings.server_url = draft_url();
            settings.validate();
            if let Err(error) = save_settings(&settings) {
                tracing::error!("Failed to save settings: {}", error);
            }
            draft_url.set(settings.server_url.clone());
        }
        app_state_server.reconnect();
    };

    rsx! {
        div { class: "screen",
            header { class: "screen-header",
                h2 { "Settings" }
            }

            section { class: "settings-section",
                h3 { "Server" }
                label { class: "field",
                    span { class: "field-label", "Server address" }
                    input {
                        class: "input",
                        value: "{draft_url}",
                        oninput: move |event| draft_url.set(event.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    onclick: on_apply,
                    "Apply"
                }
            }

            section { class: "settings-section",
                h3 { "Appearance" }
                div { class: "setting-row",
                    span { "Dark mode" }
                    button {
                        class: if dark_mode { "toggle active" } else { "toggle" },
                        onclick: move |_| {
                            let mut settings = settings_theme.write();
                            settings.theme = if settings.theme == "dark" {
                                "light".to_string()
                            } else {
                                "dark".to_string()
                            };
                            if let Err(error) = save_settings(&settings) {
                                tracing::error!("Failed to save settings: {}", error);
                            }
                        },
                        span { class: "toggle-knob" }
                    }
                }
            }

            section { class: "settings-section",
                h3 { "Language" }
                div { class: "chip-row",
                    for (code, label) in [("en", "English"), ("de", "Deutsch")] {
                        button {
                            class: if settings.language == code { "chip selected" } else { "chip" },
                            onclick: move |_| {
                                let mut settings = settings_language.write();
                                settings.language = code.to_string();
                                if let Err(error) = save_settings(&settings) {
                                    tracing::error!("Failed to save settings: {}", error);
                                }
                            },
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

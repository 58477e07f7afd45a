//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of
//! the UI tree, and the shared application state.

use crate::api::{ApiClient, ClientConfig, StatusHooks};
use crate::nav::{History, Navigator, Screen, LOGIN_PATH};
use crate::storage::settings::{load_settings, AppSettings};
use crate::ui::Layout;
use dioxus::prelude::*;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedReceiver;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub settings: Signal<AppSettings>,
    pub history: Signal<History>,
    pub client: Signal<Arc<ApiClient>>,
    pub navigator: Navigator,
    nav_rx: Arc<Mutex<Option<UnboundedReceiver<String>>>>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let (navigator, nav_rx) = Navigator::channel();
        let client = build_client(&settings.server_url, navigator.clone());

        tracing::info!("AppState initialized");
        Self {
            settings: Signal::new(settings),
            history: Signal::new(History::new()),
            client: Signal::new(Arc::new(client)),
            navigator,
            nav_rx: Arc::new(Mutex::new(Some(nav_rx))),
        }
    }

    /// Rebuild the API client against the currently configured server
    ///
    /// The new client carries the same unauthorized hook as the old one.
    pub fn reconnect(&mut self) {
        let server_url = self.settings.read().server_url.clone();
        let client = build_client(&server_url, self.navigator.clone());
        self.client.set(Arc::new(client));
        tracing::info!("API client now points at {}", server_url);
    }

    /// Take the navigation receiver, available exactly once
    fn take_nav_receiver(&self) -> Option<UnboundedReceiver<String>> {
        self.nav_rx.lock().ok().and_then(|mut rx| rx.take())
    }
}

/// Build an API client whose unauthorized hook replaces the current
/// screen with the login screen
fn build_client(server_url: &str, navigator: Navigator) -> ApiClient {
    let mut config = ClientConfig::new(server_url);
    config.hooks = StatusHooks::new().on(StatusCode::UNAUTHORIZED, move || {
        tracing::warn!("Server rejected credentials, redirecting to login");
        navigator.replace(LOGIN_PATH);
    });

    ApiClient::new(config)
}

#[component]
pub fn App() -> Element {
    let app_state = use_context_provider(AppState::new);

    // Drain navigation requests into the history for the lifetime of the app
    use_hook(move || {
        let mut history = app_state.history;
        if let Some(mut rx) = app_state.take_nav_receiver() {
            spawn(async move {
                while let Some(path) = rx.recv().await {
                    match Screen::from_path(&path) {
                        Some(screen) => history.write().replace(screen),
                        None => tracing::warn!("Ignoring navigation to unknown path: {}", path),
                    }
                }
            });
        }
    });

    rsx! {
        Layout {}
    }
}

//! Eventdesk - Desktop client for event feed imports
//!
//! A desktop application for managing calendar feed import configurations
//! on an event server.

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eventdesk::app::App;
use eventdesk::storage::init_storage;

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("eventdesk=info".parse().unwrap()))
        .init();

    info!("Starting Eventdesk v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = init_storage() {
        tracing::warn!("Storage initialization failed: {}", error);
    }

    // Launch Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::default().with_window(
                WindowBuilder::new()
                    .with_title("Eventdesk")
                    .with_inner_size(LogicalSize::new(1080.0, 720.0)),
            ),
        )
        .launch(App);
}

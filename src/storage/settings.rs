//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the event feed server, without the `/api/v1` suffix
    pub server_url: String,
    /// UI theme: "dark" or "light"
    pub theme: String,
    /// UI language: "en" or "de"
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            theme: "dark".to_string(),
            language: "en".to_string(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all fields hold usable values
    pub fn validate(&mut self) {
        // The API client appends paths to this, so a trailing slash would
        // produce double slashes in every request URL
        while self.server_url.ends_with('/') {
            self.server_url.pop();
        }

        if self.server_url.is_empty() {
            self.server_url = "http://localhost:5000".to_string();
        }

        // Validate theme
        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }

        // Validate language
        if !["en", "de"].contains(&self.language.as_str()) {
            self.language = "en".to_string();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal() -> Result<AppSettings, StorageError> {
    let path = get_settings_path()?;

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;

    // Validate loaded settings
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;

    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

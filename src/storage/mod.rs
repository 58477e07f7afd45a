//! Persistent storage
//!
//! This module handles persistence of user preferences on disk.

use std::path::PathBuf;
use thiserror::Error;

pub mod settings;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access data directory: {0}")]
    DataDirError(String),
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to serialize/deserialize JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Get the application data directory
///
/// Returns the platform-specific application data directory:
/// - Windows: `C:\Users\{user}\AppData\Roaming\Eventdesk\Eventdesk`
/// - macOS: `/Users/{user}/Library/Application Support/org.Eventdesk.Eventdesk`
/// - Linux: `/home/{user}/.local/share/eventdesk`
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("org", "Eventdesk", "Eventdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StorageError::DataDirError("Could not determine data directory".to_string()))
}

/// Initialize the storage directory structure
///
/// Creates the data directory that holds `settings.json`.
pub fn init_storage() -> Result<(), StorageError> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    tracing::info!("Initialized storage at: {}", data_dir.display());

    Ok(())
}

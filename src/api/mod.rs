//! HTTP API module
//!
//! Provides the JSON client for the event feed server, response status
//! hooks, and the data types exchanged with the API.

pub mod client;
pub mod hooks;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::ApiClient;
pub use hooks::StatusHooks;
pub use types::{
    FeedConfiguration, ImportStarted, LogEntry, Paginated, RunReport, RunStatus, TaskState,
    TaskStatus,
};

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Expected {expected}, but was 404 Not Found")]
    NotFound { expected: StatusCode },
    #[error("Expected {expected}, but was 422 Unprocessable Entity: {errors}")]
    UnprocessableEntity {
        expected: StatusCode,
        errors: serde_json::Value,
    },
    #[error("Expected {expected}, but was {actual}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },
}

/// Configuration for building an [`ApiClient`]
///
/// Status hooks are registered at construction time and run for every
/// response the client receives.
pub struct ClientConfig {
    /// Server base URL without the `/api/v1` suffix
    pub base_url: String,
    /// Hooks invoked by response status code
    pub hooks: StatusHooks,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            hooks: StatusHooks::new(),
        }
    }
}

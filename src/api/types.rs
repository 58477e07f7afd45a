//! API data types
//!
//! Mirrors the JSON payloads exchanged with the event feed server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event feed import configuration
///
/// The mapping fields (`name` through `external_link`) hold templates the
/// server evaluates against each calendar event during an import. New
/// configurations start out with the standard mappings, which pass the
/// feed values through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfiguration {
    /// Server-assigned id, 0 until the configuration has been created
    #[serde(default)]
    pub id: i64,
    pub title: Option<String>,
    /// URL of the calendar feed to import
    pub url: Option<String>,
    /// Target organization on the event server
    pub organization_id: Option<String>,
    pub name: String,
    pub organizer_name: String,
    pub place_name: String,
    pub start: String,
    pub description: String,
    pub end: String,
    pub allday: String,
    pub external_link: String,
}

impl Default for FeedConfiguration {
    fn default() -> Self {
        Self {
            id: 0,
            title: None,
            url: None,
            organization_id: None,
            name: r#"{{ standard["name"] }}"#.to_string(),
            organizer_name: r#"{{ standard["organizer_name"] }}"#.to_string(),
            place_name: r#"{{ standard["place_name"] }}"#.to_string(),
            start: r#"{{ standard["start"] }}"#.to_string(),
            description: r#"{{ standard["description"] }}"#.to_string(),
            end: r#"{{ standard["end"] }}"#.to_string(),
            allday: r#"{{ standard["allday"] }}"#.to_string(),
            external_link: r#"{{ standard["external_link"] }}"#.to_string(),
        }
    }
}

impl FeedConfiguration {
    /// Label shown in configuration lists
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled configuration")
    }

    /// Feed URL shortened for list display
    pub fn display_url(&self) -> String {
        crate::truncate_label(self.url.as_deref().unwrap_or_default(), 80)
    }
}

/// Outcome of a completed import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
}

/// Report of a single import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub status: RunStatus,
    pub failure_event_count: i64,
    pub skipped_event_count: i64,
    pub new_event_count: i64,
    pub updated_event_count: i64,
    pub unchanged_event_count: i64,
    pub deleted_event_count: i64,
    /// Per-event messages collected during the run
    #[serde(default)]
    pub log_entries: Vec<LogEntry>,
}

impl RunReport {
    /// Total number of events the run looked at
    pub fn total_event_count(&self) -> i64 {
        self.failure_event_count
            + self.skipped_event_count
            + self.new_event_count
            + self.updated_event_count
            + self.unchanged_event_count
    }
}

/// A single log line from an import run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    #[serde(default)]
    pub message: String,
    /// Entry kind, "vevent" for per-event messages
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Structured context attached by the importer
    #[serde(default)]
    pub context: serde_json::Value,
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_next: bool,
}

/// Response to starting a background import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStarted {
    /// Task id to poll for completion
    pub id: String,
}

/// Lifecycle state of a background import task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Pending,
    Started,
    Success,
    Failure,
}

impl TaskState {
    /// Whether the task has finished and polling can stop
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failure)
    }
}

/// Poll result for a background import task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    /// Run report, present once the task reaches a terminal state
    #[serde(default)]
    pub run: Option<RunReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_configuration_uses_standard_mappings() {
        let config = FeedConfiguration::default();
        assert_eq!(config.id, 0);
        assert_eq!(config.name, r#"{{ standard["name"] }}"#);
        assert_eq!(config.external_link, r#"{{ standard["external_link"] }}"#);
        assert!(config.title.is_none());
        assert!(config.url.is_none());
    }

    #[test]
    fn test_display_url_shortens_long_feeds() {
        let mut config = FeedConfiguration::default();
        assert_eq!(config.display_url(), "");

        config.url = Some("https://example.org/feed.ics".to_string());
        assert_eq!(config.display_url(), "https://example.org/feed.ics");

        config.url = Some(format!("https://example.org/{}", "x".repeat(200)));
        let shown = config.display_url();
        assert!(shown.len() < 90);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_display_title_fallback() {
        let mut config = FeedConfiguration::default();
        assert_eq!(config.display_title(), "Untitled configuration");

        config.title = Some(String::new());
        assert_eq!(config.display_title(), "Untitled configuration");

        config.title = Some("Town hall calendar".to_string());
        assert_eq!(config.display_title(), "Town hall calendar");
    }

    #[test]
    fn test_run_report_deserialization() {
        let json = r#"{
            "id": 7,
            "created_at": "2026-08-22T12:00:00Z",
            "status": "success",
            "failure_event_count": 0,
            "skipped_event_count": 1,
            "new_event_count": 3,
            "updated_event_count": 2,
            "unchanged_event_count": 4,
            "deleted_event_count": 0,
            "log_entries": [
                {"id": 1, "message": "Imported event", "type": "vevent", "context": {"uid": "a@b"}}
            ]
        }"#;

        let report: RunReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.total_event_count(), 10);
        assert_eq!(report.log_entries.len(), 1);
        assert_eq!(report.log_entries[0].kind, "vevent");
        assert_eq!(report.log_entries[0].context["uid"], "a@b");
    }

    #[test]
    fn test_run_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RunStatus::Failure).unwrap(),
            "\"failure\""
        );
        let status: RunStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(status, RunStatus::Success);
    }

    #[test]
    fn test_paginated_without_has_next() {
        let json = r#"{"items": [1, 2, 3]}"#;
        let page: Paginated<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(!page.has_next);
    }

    #[test]
    fn test_task_state_terminal() {
        assert!(TaskState::Success.is_terminal());
        assert!(TaskState::Failure.is_terminal());
        assert!(!TaskState::Pending.is_terminal());
        assert!(!TaskState::Started.is_terminal());
    }

    #[test]
    fn test_task_status_without_run() {
        let status: TaskStatus = serde_json::from_str(r#"{"state": "PENDING"}"#).unwrap();
        assert_eq!(status.state, TaskState::Pending);
        assert!(status.run.is_none());
    }
}

//! Run report screen
//!
//! Shows the outcome of one import run: status, event counters and the
//! log entries recorded by the server while it processed the feed.

use crate::api::types::{RunReport, RunStatus};
use crate::app::AppState;
use crate::ui::components::loading::Spinner;
use dioxus::prelude::*;

#[component]
pub fn RunReportScreen(props: RunReportScreenProps) -> Element {
    let app_state = use_context::<AppState>();
    let client = app_state.client;
    let configuration_id = props.configuration_id;
    let run_id = props.run_id;

    let mut report = use_signal(|| None::<RunReport>);
    let mut load_error = use_signal(|| None::<String>);

    use_hook(move || {
        spawn(async move {
            let client = client.read().clone();
            match client.get_run(configuration_id, run_id).await {
                Ok(run) => report.set(Some(run)),
                Err(error) => {
                    tracing::error!(
                        "Failed to load run {} of configuration {}: {}",
                        run_id,
                        configuration_id,
                        error
                    );
                    load_error.set(Some(error.to_string()));
                }
            }
        });
    });

    rsx! {
        div { class: "screen",
            match load_error.read().clone() {
                Some(message) => rsx! { div { class: "banner banner-error", "{message}" } },
                None => rsx! {},
            }

            match report.read().clone() {
                None => rsx! { div { class: "screen-loading", Spinner {} } },
                Some(run) => rsx! {
                    header { class: "screen-header",
                        h2 { "Run from {run.created_at}" }
                    }
                    RunSummary { report: run.clone() }
                    section { class: "log-section",
                        h3 { "Log" }
                        if run.log_entries.is_empty() {
                            p { class: "text-secondary", "The server recorded no log entries for this run." }
                        } else {
                            ul { class: "log-list",
                                for entry in run.log_entries.clone() {
                                    li { class: "log-entry",
                                        span { class: "log-kind", "{entry.kind}" }
                                        span { class: "log-message", "{entry.message}" }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RunReportScreenProps {
    pub configuration_id: i64,
    pub run_id: i64,
}

/// Status badge and event counters for one run, also used by the
/// preview panel in the configuration editor.
#[component]
pub fn RunSummary(props: RunSummaryProps) -> Element {
    let report = &props.report;

    rsx! {
        div { class: "run-summary",
            if report.status == RunStatus::Success {
                span { class: "badge badge-success", "success" }
            } else {
                span { class: "badge badge-failure", "failure" }
            }
            div { class: "count-grid",
                CountCell { label: "New", value: report.new_event_count }
                CountCell { label: "Updated", value: report.updated_event_count }
                CountCell { label: "Unchanged", value: report.unchanged_event_count }
                CountCell { label: "Skipped", value: report.skipped_event_count }
                CountCell { label: "Deleted", value: report.deleted_event_count }
                CountCell { label: "Failed", value: report.failure_event_count }
            }
            p { class: "text-secondary",
                "{report.total_event_count()} events in the feed."
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct RunSummaryProps {
    pub report: RunReport,
}

#[component]
fn CountCell(props: CountCellProps) -> Element {
    rsx! {
        div { class: "count-cell",
            span { class: "count-value", "{props.value}" }
            span { class: "count-label", "{props.label}" }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CountCellProps {
    label: String,
    value: i64,
}

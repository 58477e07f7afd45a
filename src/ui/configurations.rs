//! Configuration screens
//!
//! The list of import configurations and the editor for a single one.
//! Every server-backed action runs behind an [`ActionButton`], which shows
//! the loading indicator while the request is in flight.

use crate::api::types::{FeedConfiguration, RunReport, RunStatus, TaskStatus};
use crate::api::{ApiClient, ApiError};
use crate::app::AppState;
use crate::nav::Screen;
use crate::ui::components::button::{ActionButton, ButtonState};
use crate::ui::components::loading::Spinner;
use crate::ui::run_report::RunSummary;
use dioxus::prelude::*;
use std::time::Duration;

pub fn ConfigurationsScreen() -> Element {
    let app_state = use_context::<AppState>();
    let client = app_state.client;
    let mut history = app_state.history;

    let mut configurations = use_signal(|| None::<Vec<FeedConfiguration>>);
    let mut load_error = use_signal(|| None::<String>);
    let mut new_button = use_signal(|| ButtonState::new("New configuration"));

    use_hook(move || {
        spawn(async move {
            let client = client.read().clone();
            match client.list_configurations().await {
                Ok(list) => configurations.set(Some(list)),
                Err(error) => {
                    tracing::error!("Failed to load configurations: {}", error);
                    load_error.set(Some(error.to_string()));
                }
            }
        });
    });

    rsx! {
        div { class: "screen",
            header { class: "screen-header",
                h2 { "Configurations" }
                ActionButton {
                    state: new_button,
                    class: "btn-primary".to_string(),
                    onclick: move |_| {
                        new_button.write().begin_loading();
                        spawn(async move {
                            let client = client.read().clone();
                            match client.create_configuration().await {
                                Ok(created) => {
                                    new_button.write().finish_loading();
                                    history.write().push(Screen::Configuration(created.id));
                                }
                                Err(error) => {
                                    tracing::error!("Failed to create configuration: {}", error);
                                    new_button.write().finish_loading();
                                }
                            }
                        });
                    },
                }
            }

            match load_error.read().clone() {
                Some(message) => rsx! { div { class: "banner banner-error", "{message}" } },
                None => rsx! {},
            }

            match &*configurations.read() {
                None => rsx! { div { class: "screen-loading", Spinner {} } },
                Some(list) if list.is_empty() => rsx! {
                    p { class: "empty-hint", "No configurations yet. Create one to start importing a calendar feed." }
                },
                Some(list) => rsx! {
                    ul { class: "config-list",
                        for configuration in list.clone() {
                            li {
                                button {
                                    class: "config-row",
                                    onclick: move |_| history.write().push(Screen::Configuration(configuration.id)),
                                    span { class: "config-title", "{configuration.display_title()}" }
                                    span { class: "config-url", "{configuration.display_url()}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ConfigurationEditor(props: ConfigurationEditorProps) -> Element {
    let app_state = use_context::<AppState>();
    let client = app_state.client;
    let mut history = app_state.history;
    let id = props.id;

    let mut draft = use_signal(|| None::<FeedConfiguration>);
    let mut runs = use_signal(|| None::<Vec<RunReport>>);
    let mut preview = use_signal(|| None::<RunReport>);
    let mut status_line = use_signal(|| None::<String>);

    let mut save_button = use_signal(|| ButtonState::new("Save"));
    let mut preview_button = use_signal(|| ButtonState::new("Preview"));
    let mut import_button = use_signal(|| ButtonState::new("Import now"));
    let mut reset_button = use_signal(|| ButtonState::new("Reset"));
    let mut delete_button = use_signal(|| ButtonState::new("Delete"));

    use_hook(move || {
        spawn(async move {
            let client = client.read().clone();
            match client.get_configuration(id).await {
                Ok(configuration) => draft.set(Some(configuration)),
                Err(error) => {
                    tracing::error!("Failed to load configuration {}: {}", id, error);
                    status_line.set(Some(error.to_string()));
                }
            }
            match client.list_runs(id).await {
                Ok(list) => runs.set(Some(list)),
                Err(error) => {
                    tracing::error!("Failed to load runs for configuration {}: {}", id, error);
                }
            }
        });
    });

    let on_save = move |_| {
        let Some(configuration) = draft.read().clone() else {
            return;
        };
        save_button.write().begin_loading();
        spawn(async move {
            let client = client.read().clone();
            match client.save_configuration(&configuration).await {
                Ok(()) => status_line.set(Some("Saved.".to_string())),
                Err(error) => {
                    tracing::error!("Failed to save configuration {}: {}", configuration.id, error);
                    status_line.set(Some(describe_error(&error)));
                }
            }
            save_button.write().finish_loading();
        });
    };

    let on_preview = move |_| {
        let Some(configuration) = draft.read().clone() else {
            return;
        };
        preview_button.write().begin_loading();
        spawn(async move {
            let client = client.read().clone();
            match client.preview_import(&configuration).await {
                Ok(report) => preview.set(Some(report)),
                Err(error) => {
                    tracing::error!("Preview failed for configuration {}: {}", configuration.id, error);
                    status_line.set(Some(describe_error(&error)));
                }
            }
            preview_button.write().finish_loading();
        });
    };

    let on_import = move |_| {
        import_button.write().begin_loading();
        spawn(async move {
            let result = {
                let client = client.read().clone();
                run_import(&client, id).await
            };

            match result {
                Ok(status) => {
                    import_button.write().finish_loading();
                    let refreshed = {
                        let client = client.read().clone();
                        client.list_runs(id).await
                    };
                    if let Ok(list) = refreshed {
                        runs.set(Some(list));
                    }
                    match status.run {
                        Some(report) => history.write().push(Screen::Run(id, report.id)),
                        None => status_line.set(Some("Import finished.".to_string())),
                    }
                }
                Err(error) => {
                    tracing::error!("Import failed for configuration {}: {}", id, error);
                    status_line.set(Some(error.to_string()));
                    import_button.write().finish_loading();
                }
            }
        });
    };

    let on_reset = move |_| {
        reset_button.write().begin_loading();
        spawn(async move {
            let client = client.read().clone();
            match client.reset_configuration(id).await {
                Ok(()) => status_line.set(Some(
                    "Import memory cleared. The next run imports every event again.".to_string(),
                )),
                Err(error) => {
                    tracing::error!("Failed to reset configuration {}: {}", id, error);
                    status_line.set(Some(error.to_string()));
                }
            }
            reset_button.write().finish_loading();
        });
    };

    let on_delete = move |_| {
        delete_button.write().begin_loading();
        spawn(async move {
            let client = client.read().clone();
            match client.delete_configuration(id).await {
                Ok(()) => {
                    // The editor for a deleted configuration must not be
                    // reachable via back
                    history.write().replace(Screen::Configurations);
                }
                Err(error) => {
                    tracing::error!("Failed to delete configuration {}: {}", id, error);
                    status_line.set(Some(error.to_string()));
                    delete_button.write().finish_loading();
                }
            }
        });
    };

    rsx! {
        div { class: "screen",
            match status_line.read().clone() {
                Some(message) => rsx! { div { class: "banner", "{message}" } },
                None => rsx! {},
            }

            match &*draft.read() {
                None => rsx! { div { class: "screen-loading", Spinner {} } },
                Some(configuration) => {
                    let title = configuration.title.clone().unwrap_or_default();
                    let url = configuration.url.clone().unwrap_or_default();
                    let organization_id = configuration.organization_id.clone().unwrap_or_default();

                    rsx! {
                        header { class: "screen-header",
                            h2 { "{configuration.display_title()}" }
                            div { class: "button-row",
                                ActionButton { state: save_button, class: "btn-primary".to_string(), onclick: on_save }
                                ActionButton { state: preview_button, onclick: on_preview }
                                ActionButton { state: import_button, onclick: on_import }
                                ActionButton { state: reset_button, onclick: on_reset }
                                ActionButton { state: delete_button, class: "btn-danger".to_string(), onclick: on_delete }
                            }
                        }

                        section { class: "form-section",
                            label { class: "field",
                                span { class: "field-label", "Title" }
                                input {
                                    class: "input",
                                    value: "{title}",
                                    oninput: move |event| {
                                        if let Some(c) = draft.write().as_mut() {
                                            c.title = Some(event.value());
                                        }
                                    },
                                }
                            }
                            label { class: "field",
                                span { class: "field-label", "Feed URL" }
                                input {
                                    class: "input",
                                    value: "{url}",
                                    oninput: move |event| {
                                        if let Some(c) = draft.write().as_mut() {
                                            c.url = Some(event.value());
                                        }
                                    },
                                }
                            }
                            label { class: "field",
                                span { class: "field-label", "Organization" }
                                input {
                                    class: "input",
                                    value: "{organization_id}",
                                    oninput: move |event| {
                                        if let Some(c) = draft.write().as_mut() {
                                            c.organization_id = Some(event.value());
                                        }
                                    },
                                }
                            }
                        }

                        section { class: "form-section",
                            h3 { "Event mapping" }
                            p { class: "text-secondary",
                                "Templates evaluated against each calendar event. Leave the standard mappings in place to pass feed values through unchanged."
                            }
                            MappingField {
                                label: "Name",
                                value: configuration.name.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.name = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "Organizer",
                                value: configuration.organizer_name.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.organizer_name = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "Place",
                                value: configuration.place_name.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.place_name = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "Start",
                                value: configuration.start.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.start = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "End",
                                value: configuration.end.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.end = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "All day",
                                value: configuration.allday.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.allday = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "Description",
                                value: configuration.description.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.description = event.value();
                                    }
                                },
                            }
                            MappingField {
                                label: "External link",
                                value: configuration.external_link.clone(),
                                oninput: move |event: FormEvent| {
                                    if let Some(c) = draft.write().as_mut() {
                                        c.external_link = event.value();
                                    }
                                },
                            }
                        }
                    }
                }
            }

            match preview.read().clone() {
                Some(report) => rsx! {
                    section { class: "preview-section",
                        h3 { "Preview" }
                        p { class: "text-secondary", "Dry run, nothing was written to the server." }
                        RunSummary { report }
                    }
                },
                None => rsx! {},
            }

            section { class: "runs-section",
                h3 { "Runs" }
                match &*runs.read() {
                    None => rsx! { p { class: "text-secondary", "Loading runs..." } },
                    Some(list) if list.is_empty() => rsx! { p { class: "text-secondary", "No runs yet." } },
                    Some(list) => rsx! {
                        ul { class: "run-list",
                            for run in list.clone() {
                                li {
                                    button {
                                        class: "run-row",
                                        onclick: move |_| history.write().push(Screen::Run(id, run.id)),
                                        if run.status == RunStatus::Success {
                                            span { class: "badge badge-success", "success" }
                                        } else {
                                            span { class: "badge badge-failure", "failure" }
                                        }
                                        span { class: "run-date", "{run.created_at}" }
                                        span { class: "run-counts",
                                            "{run.new_event_count} new, {run.updated_event_count} updated, {run.failure_event_count} failed"
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
}

#[derive(Props, Clone, PartialEq)]
pub struct ConfigurationEditorProps {
    pub id: i64,
}

/// Start a background import and poll until the task finishes
async fn run_import(client: &ApiClient, id: i64) -> Result<TaskStatus, ApiError> {
    let started = client.start_import(id).await?;
    tracing::info!("Import task {} started for configuration {}", started.id, id);

    loop {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let status = client.poll_import(id, &started.id).await?;

        if status.state.is_terminal() {
            return Ok(status);
        }
    }
}

fn describe_error(error: &ApiError) -> String {
    match error {
        ApiError::UnprocessableEntity { errors, .. } => {
            format!("The server rejected the configuration: {}", errors)
        }
        _ => error.to_string(),
    }
}

#[component]
fn MappingField(props: MappingFieldProps) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{props.label}" }
            textarea {
                class: "input input-mono",
                rows: "2",
                value: "{props.value}",
                oninput: move |event| props.oninput.call(event),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct MappingFieldProps {
    label: String,
    value: String,
    oninput: EventHandler<FormEvent>,
}

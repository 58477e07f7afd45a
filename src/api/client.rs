//! JSON API client
//!
//! Wraps a reqwest client with the server's response conventions. Each
//! verb has one expected status code, and every response runs the status
//! hooks registered at construction before it is checked.

use crate::api::hooks::StatusHooks;
use crate::api::types::{
    FeedConfiguration, ImportStarted, Paginated, RunReport, TaskStatus,
};
use crate::api::{ApiError, ClientConfig};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Client for the event feed server's JSON API
///
/// All requests go to `{base_url}/api/v1`. The hook table is fixed at
/// construction.
pub struct ApiClient {
    http: Client,
    base_url: String,
    hooks: StatusHooks,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url,
            hooks: config.hooks,
        }
    }

    /// Build the full request URL for an API path
    fn complete_url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Run status hooks, then check the response against the expected status
    ///
    /// Hooks run for every response, matching or not. A 422 consumes the
    /// body to capture the server's validation errors.
    async fn check_status(
        &self,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response, ApiError> {
        let actual = response.status();
        tracing::debug!("Response: {}", actual);

        self.hooks.dispatch(actual);

        if actual == expected {
            return Ok(response);
        }

        match actual {
            StatusCode::UNPROCESSABLE_ENTITY => {
                let errors = response.json().await.unwrap_or(serde_json::Value::Null);
                Err(ApiError::UnprocessableEntity { expected, errors })
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { expected }),
            _ => Err(ApiError::UnexpectedStatus { expected, actual }),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.complete_url(path);
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let response = self.check_status(response, StatusCode::OK).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        data: &impl Serialize,
        expected: StatusCode,
    ) -> Result<T, ApiError> {
        let url = self.complete_url(path);
        tracing::debug!("POST {}", url);
        let response = self.http.post(&url).json(data).send().await?;
        let response = self.check_status(response, expected).await?;
        Ok(response.json().await?)
    }

    async fn post_no_content(&self, path: &str) -> Result<(), ApiError> {
        let url = self.complete_url(path);
        tracing::debug!("POST {}", url);
        let response = self.http.post(&url).json(&serde_json::json!({})).send().await?;
        self.check_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn put(&self, path: &str, data: &impl Serialize) -> Result<(), ApiError> {
        let url = self.complete_url(path);
        tracing::debug!("PUT {}", url);
        let response = self.http.put(&url).json(data).send().await?;
        self.check_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.complete_url(path);
        tracing::debug!("DELETE {}", url);
        let response = self.http.delete(&url).send().await?;
        self.check_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    /// Fetch all configurations, walking the pagination
    pub async fn list_configurations(&self) -> Result<Vec<FeedConfiguration>, ApiError> {
        tracing::debug!("List configurations");
        let mut configurations = Vec::new();
        let mut page = 1;

        loop {
            let pagination: Paginated<FeedConfiguration> = self
                .get(&format!("/configurations?per_page=50&page={}", page))
                .await?;
            configurations.extend(pagination.items);

            if pagination.has_next {
                page += 1;
            } else {
                break;
            }
        }

        Ok(configurations)
    }

    /// Create a configuration with the standard mappings
    pub async fn create_configuration(&self) -> Result<FeedConfiguration, ApiError> {
        tracing::debug!("Create configuration");
        self.post("/configurations", &serde_json::json!({}), StatusCode::CREATED)
            .await
    }

    pub async fn get_configuration(&self, id: i64) -> Result<FeedConfiguration, ApiError> {
        tracing::debug!("Get configuration {}", id);
        self.get(&format!("/configurations/{}", id)).await
    }

    pub async fn save_configuration(&self, configuration: &FeedConfiguration) -> Result<(), ApiError> {
        tracing::debug!("Save configuration {}", configuration.id);
        self.put(&format!("/configurations/{}", configuration.id), configuration)
            .await
    }

    /// Forget which events earlier runs imported, keeping the configuration
    pub async fn reset_configuration(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!("Reset configuration {}", id);
        self.post_no_content(&format!("/configurations/{}/reset", id))
            .await
    }

    /// Delete a configuration, tolerating one that is already gone
    pub async fn delete_configuration(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!("Delete configuration {}", id);

        match self.delete(&format!("/configurations/{}", id)).await {
            Err(ApiError::NotFound { .. }) => {
                tracing::debug!("Configuration {} already deleted", id);
                Ok(())
            }
            result => result,
        }
    }

    /// Dry-run an import with unsaved mapping values, returning the report
    pub async fn preview_import(
        &self,
        configuration: &FeedConfiguration,
    ) -> Result<RunReport, ApiError> {
        tracing::debug!("Preview import for configuration {}", configuration.id);
        self.post(
            &format!("/configurations/{}/preview", configuration.id),
            configuration,
            StatusCode::OK,
        )
        .await
    }

    /// Start a background import, returning the task id to poll
    pub async fn start_import(&self, id: i64) -> Result<ImportStarted, ApiError> {
        tracing::debug!("Start import for configuration {}", id);
        self.post(
            &format!("/configurations/{}/import", id),
            &serde_json::json!({}),
            StatusCode::ACCEPTED,
        )
        .await
    }

    pub async fn poll_import(&self, id: i64, task_id: &str) -> Result<TaskStatus, ApiError> {
        self.get(&format!("/configurations/{}/import?poll={}", id, task_id))
            .await
    }

    /// Fetch all runs for a configuration, newest first, walking the pagination
    pub async fn list_runs(&self, id: i64) -> Result<Vec<RunReport>, ApiError> {
        tracing::debug!("List runs for configuration {}", id);
        let mut runs = Vec::new();
        let mut page = 1;

        loop {
            let pagination: Paginated<RunReport> = self
                .get(&format!(
                    "/configurations/{}/runs?per_page=50&page={}",
                    id, page
                ))
                .await?;
            runs.extend(pagination.items);

            if pagination.has_next {
                page += 1;
            } else {
                break;
            }
        }

        Ok(runs)
    }

    pub async fn get_run(&self, id: i64, run_id: i64) -> Result<RunReport, ApiError> {
        tracing::debug!("Get run {} for configuration {}", run_id, id);
        self.get(&format!("/configurations/{}/runs/{}", id, run_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TaskState;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Serve canned responses on a local port, one connection per response,
    /// recording the request line of each incoming request
    fn serve(responses: Vec<String>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        std::thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };
                let request_line = read_request(&mut stream);
                seen.lock().unwrap().push(request_line);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{}", addr), requests)
    }

    /// Consume one HTTP request from the stream, returning its request line
    fn read_request(stream: &mut TcpStream) -> String {
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        let mut content_length = 0usize;

        reader.read_line(&mut request_line).unwrap();

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }

        let mut body = vec![0u8; content_length];
        let _ = reader.read_exact(&mut body);
        request_line.trim_end().to_string()
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base_url))
    }

    fn client_with_counter(base_url: &str, status: StatusCode) -> (ApiClient, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut config = ClientConfig::new(base_url);
        config.hooks = StatusHooks::new().on(status, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ApiClient::new(config), calls)
    }

    #[tokio::test]
    async fn test_get_configuration_hits_api_path() {
        let configuration = FeedConfiguration {
            id: 5,
            title: Some("Town hall calendar".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_string(&configuration).unwrap();
        let (base_url, requests) = serve(vec![http_response("200 OK", &body)]);

        let client = client_for(&base_url);
        let fetched = client.get_configuration(5).await.unwrap();

        assert_eq!(fetched, configuration);
        assert_eq!(
            requests.lock().unwrap()[0],
            "GET /api/v1/configurations/5 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_unexpected_status_maps_to_error() {
        let (base_url, _) = serve(vec![http_response("500 Internal Server Error", "")]);

        let client = client_for(&base_url);
        let result = client.get_configuration(1).await;

        match result {
            Err(ApiError::UnexpectedStatus { expected, actual }) => {
                assert_eq!(expected, StatusCode::OK);
                assert_eq!(actual, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_missing_configuration_maps_to_not_found() {
        let (base_url, _) = serve(vec![http_response("404 Not Found", "")]);

        let client = client_for(&base_url);
        let result = client.get_configuration(99).await;

        assert!(matches!(result, Err(ApiError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unprocessable_entity_carries_server_errors() {
        let errors = r#"{"errors": [{"field": "photo", "message": "too large"}]}"#;
        let (base_url, _) = serve(vec![http_response("422 Unprocessable Entity", errors)]);

        let client = client_for(&base_url);
        let result = client
            .save_configuration(&FeedConfiguration::default())
            .await;

        match result {
            Err(ApiError::UnprocessableEntity { errors, .. }) => {
                assert_eq!(errors["errors"][0]["field"], "photo");
            }
            other => panic!("Expected UnprocessableEntity, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_runs_hook_exactly_once() {
        let (base_url, _) = serve(vec![http_response("401 Unauthorized", "")]);
        let (client, calls) = client_with_counter(&base_url, StatusCode::UNAUTHORIZED);

        let result = client.get_configuration(1).await;

        assert!(matches!(result, Err(ApiError::UnexpectedStatus { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hook_ignores_other_statuses() {
        let configuration = FeedConfiguration::default();
        let body = serde_json::to_string(&configuration).unwrap();
        let (base_url, _) = serve(vec![
            http_response("200 OK", &body),
            http_response("404 Not Found", ""),
            http_response("500 Internal Server Error", ""),
        ]);
        let (client, calls) = client_with_counter(&base_url, StatusCode::UNAUTHORIZED);

        let _ = client.get_configuration(1).await;
        let _ = client.get_configuration(1).await;
        let _ = client.get_configuration(1).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_routes_to_login_exactly_once() {
        let (base_url, _) = serve(vec![http_response("401 Unauthorized", "")]);
        let (navigator, mut rx) = crate::nav::Navigator::channel();
        let mut config = ClientConfig::new(&base_url);
        config.hooks = StatusHooks::new().on(StatusCode::UNAUTHORIZED, move || {
            navigator.replace(crate::nav::LOGIN_PATH);
        });
        let client = ApiClient::new(config);

        let _ = client.get_configuration(1).await;

        assert_eq!(rx.recv().await.as_deref(), Some(crate::nav::LOGIN_PATH));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_each_unauthorized_response_runs_hook() {
        let (base_url, _) = serve(vec![
            http_response("401 Unauthorized", ""),
            http_response("401 Unauthorized", ""),
        ]);
        let (client, calls) = client_with_counter(&base_url, StatusCode::UNAUTHORIZED);

        let _ = client.get_configuration(1).await;
        let _ = client.get_configuration(2).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_list_configurations_walks_pagination() {
        let first = FeedConfiguration {
            id: 1,
            ..Default::default()
        };
        let second = FeedConfiguration {
            id: 2,
            ..Default::default()
        };
        let page_one = serde_json::json!({"items": [first], "has_next": true}).to_string();
        let page_two = serde_json::json!({"items": [second], "has_next": false}).to_string();
        let (base_url, requests) = serve(vec![
            http_response("200 OK", &page_one),
            http_response("200 OK", &page_two),
        ]);

        let client = client_for(&base_url);
        let configurations = client.list_configurations().await.unwrap();

        assert_eq!(configurations.len(), 2);
        assert_eq!(configurations[0].id, 1);
        assert_eq!(configurations[1].id, 2);

        let seen = requests.lock().unwrap();
        assert!(seen[0].contains("page=1"));
        assert!(seen[1].contains("page=2"));
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_configuration() {
        let (base_url, _) = serve(vec![
            http_response("204 No Content", ""),
            http_response("404 Not Found", ""),
        ]);

        let client = client_for(&base_url);
        assert!(client.delete_configuration(1).await.is_ok());
        assert!(client.delete_configuration(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_start_import_returns_task_id() {
        let (base_url, requests) = serve(vec![http_response(
            "202 Accepted",
            r#"{"id": "3f2c6f4e-task"}"#,
        )]);

        let client = client_for(&base_url);
        let started = client.start_import(4).await.unwrap();

        assert_eq!(started.id, "3f2c6f4e-task");
        assert_eq!(
            requests.lock().unwrap()[0],
            "POST /api/v1/configurations/4/import HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_poll_import_reports_task_state() {
        let pending = r#"{"state": "PENDING"}"#;
        let (base_url, requests) = serve(vec![http_response("200 OK", pending)]);

        let client = client_for(&base_url);
        let status = client.poll_import(4, "3f2c6f4e-task").await.unwrap();

        assert_eq!(status.state, TaskState::Pending);
        assert!(status.run.is_none());
        assert!(requests.lock().unwrap()[0].contains("/import?poll=3f2c6f4e-task"));
    }
}

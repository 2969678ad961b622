//! Shared HTTP plumbing for the task-store REST API.
//!
//! Every resource client wraps an [`ApiClient`], which owns the reqwest
//! client, the base URL, and the `x-user-address` identity header, and
//! translates HTTP failures into the [`ApiError`] taxonomy.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::core::Config;

/// Result type for task-store API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error types for task-store API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, or similar transport-level failure.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The 10-second transport timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Any other reqwest-level failure (body read, TLS, redirect loop).
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// HTTP 401, or a missing identity header rejected by the store.
    #[error("authentication required")]
    Unauthorized,

    /// HTTP 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// Other 4xx responses.
    #[error("invalid request: {message} (status: {status})")]
    Validation { status: u16, message: String },

    /// 5xx responses.
    #[error("server error: {message} (status: {status})")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this failure means the backend cannot be reached at all,
    /// as opposed to the backend rejecting the request.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout)
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// Unwrap the store's response envelope.
///
/// List/detail endpoints may wrap the payload in a `data` field; callers
/// must accept either the bare payload or `{"data": payload}`.
pub fn unwrap_envelope<T: DeserializeOwned>(value: serde_json::Value) -> ApiResult<T> {
    let payload = match value {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(payload)?)
}

/// HTTP client for the task-store API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    address: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> ApiResult<Self> {
        Self::with_address(config, config.identity.address.clone())
    }

    /// Create a client acting as a specific wallet address.
    pub fn with_address(config: &Config, address: Option<String>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            address,
        })
    }

    /// The wallet address this client acts as.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Build a full URL under the API base path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request with the identity header attached.
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.request(method, url);
        if let Some(address) = &self.address {
            builder = builder.header("x-user-address", address);
        }
        builder
    }

    /// Send a request and decode the (possibly enveloped) JSON response.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let value: serde_json::Value =
            response.json().await.map_err(ApiError::from_reqwest)?;
        unwrap_envelope(value)
    }

    /// Send a request and discard the response body (deletes).
    pub async fn send_empty(&self, builder: reqwest::RequestBuilder) -> ApiResult<()> {
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        Ok(())
    }

    /// Map an error response onto the taxonomy.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::Validation { status, message },
            _ => ApiError::Server { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Task, TaskStatus};

    #[test]
    fn test_unwrap_bare_payload() {
        let value = serde_json::json!([
            {"id": 1, "title": "a", "status": 0, "projectId": 1}
        ]);
        let tasks: Vec<Task> = unwrap_envelope(value).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn test_unwrap_data_envelope() {
        let value = serde_json::json!({
            "data": {"id": 2, "title": "b", "status": 2, "projectId": 1}
        });
        let task: Task = unwrap_envelope(value).unwrap();
        assert_eq!(task.id, 2);
        assert_eq!(task.status, TaskStatus::InReview);
    }

    #[test]
    fn test_unwrap_rejects_mismatched_shape() {
        let value = serde_json::json!({"data": "not a task"});
        assert!(unwrap_envelope::<Task>(value).is_err());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = Config::default();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/tasks"), "http://localhost:3000/api/v1/tasks");
        assert_eq!(client.url("tasks/7"), "http://localhost:3000/api/v1/tasks/7");
    }

    #[test]
    fn test_client_carries_address() {
        let config = Config::default();
        let client =
            ApiClient::with_address(&config, Some("0xABC".to_string())).unwrap();
        assert_eq!(client.address(), Some("0xABC"));
    }

    #[test]
    fn test_unreachable_classification() {
        assert!(ApiError::Timeout.is_unreachable());
        assert!(ApiError::Unreachable("refused".to_string()).is_unreachable());
        assert!(!ApiError::Unauthorized.is_unreachable());
        assert!(!ApiError::NotFound("x".to_string()).is_unreachable());
    }
}

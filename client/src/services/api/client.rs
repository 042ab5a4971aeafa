//! # API Client
//!
//! The reqwest-backed [`Gateway`]: every backend call goes through
//! [`ApiClient::request`](Gateway::request).

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result, REQUEST_FAILED};
use crate::core::service::{Gateway, RequestOptions};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use shared::ErrorResponse;
use std::time::{Duration, Instant};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for communicating with the places backend.
///
/// Holds one connection pool for the lifetime of the app. Cloning is cheap
/// and shares the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_timeout(config.api_base_url.clone(), config.request_timeout)
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Gateway for ApiClient {
    #[tracing::instrument(skip(self, options), fields(method = %options.method, path = %path))]
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let start = Instant::now();
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .client
            .request(options.method, &url)
            .headers(merge_headers(&options.headers)?);
        if let Some(body) = &options.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, url = %url, "Request network error");
            AppError::Request(format!("Network error: {}", e))
        })?;

        let status = response.status();
        // A body that cannot be read is handled like one that cannot be parsed.
        let body = response.bytes().await.unwrap_or_default();
        let duration = start.elapsed();

        let result = normalize_response(status, &body);
        match &result {
            Ok(_) => tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Request succeeded"
            ),
            Err(err) => tracing::warn!(
                status = status.as_u16(),
                error = %err.message(),
                duration_ms = duration.as_millis(),
                "Request failed"
            ),
        }
        result
    }
}

/// JSON content type overlaid with the caller's headers. A caller header
/// replaces the default of the same name.
fn merge_headers(extra: &std::collections::HashMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::Request(format!("Invalid header name {}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| AppError::Request(format!("Invalid header value for {}: {}", name, e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Turn a status and raw body into the gateway's result shape.
///
/// - success + JSON body: the parsed value
/// - success + empty or unparsable body: `{}`
/// - failure: [`AppError::Request`] with the body's `detail`, or `"Request failed"`
pub fn normalize_response(status: StatusCode, body: &[u8]) -> Result<Value> {
    if status.is_success() {
        return Ok(serde_json::from_slice(body).unwrap_or_else(|_| Value::Object(Map::new())));
    }

    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|error| error.message().map(str::to_string))
        .unwrap_or_else(|| REQUEST_FAILED.to_string());
    Err(AppError::Request(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_body_is_parsed() {
        let value = normalize_response(StatusCode::CREATED, br#"{"token":"abc"}"#).unwrap();
        assert_eq!(value, json!({"token": "abc"}));
    }

    #[test]
    fn test_success_without_body_is_empty_object() {
        assert_eq!(normalize_response(StatusCode::OK, b"").unwrap(), json!({}));
        assert_eq!(normalize_response(StatusCode::OK, b"<html>").unwrap(), json!({}));
    }

    #[test]
    fn test_failure_uses_detail() {
        let err = normalize_response(StatusCode::BAD_REQUEST, br#"{"detail":"bad email"}"#).unwrap_err();
        assert_eq!(err, AppError::Request("bad email".to_string()));
    }

    #[test]
    fn test_failure_without_detail_is_generic() {
        let unparsable = normalize_response(StatusCode::INTERNAL_SERVER_ERROR, b"oops").unwrap_err();
        assert_eq!(unparsable.message(), REQUEST_FAILED);

        let no_detail = normalize_response(StatusCode::NOT_FOUND, br#"{"error":"x"}"#).unwrap_err();
        assert_eq!(no_detail.message(), REQUEST_FAILED);
    }

    #[test]
    fn test_caller_content_type_replaces_default() {
        let extra = std::collections::HashMap::from([(
            "Content-Type".to_string(),
            "application/json; charset=utf-8".to_string(),
        )]);
        let headers = merge_headers(&extra).unwrap();

        let values: Vec<_> = headers.get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(values, vec!["application/json; charset=utf-8"]);
    }

    #[test]
    fn test_invalid_header_name_is_a_request_error() {
        let extra = std::collections::HashMap::from([("bad header".to_string(), "x".to_string())]);
        assert!(matches!(merge_headers(&extra), Err(AppError::Request(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        assert_eq!(ApiClient::new("http://localhost:8000/").base_url(), "http://localhost:8000");
    }
}

//! # Service Traits
//!
//! Seams for dependency injection. Production code plugs in
//! [`crate::services::api::ApiClient`] and [`crate::services::location`]
//! providers; tests plug in scripted mocks.

use crate::core::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use shared::Coordinates;
use std::collections::HashMap;

/// Options for a single gateway call: method, optional JSON body and extra headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HashMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self {
            method: Method::POST,
            ..Self::default()
        }
    }

    /// Attach a JSON body. Serializing the DTOs in `shared` cannot fail, so a
    /// failure here degrades to a `null` body rather than an error.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body).unwrap_or(Value::Null));
        self
    }

    /// Merge extra headers (e.g. the session's authorization header).
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// The single chokepoint every backend call goes through.
///
/// Implementations must:
/// - send `Content-Type: application/json` alongside the caller's headers
/// - map non-success responses to [`crate::AppError::Request`] carrying the
///   error body's `detail`, or `"Request failed"`
/// - return an empty JSON object for a success response without a parsable body
/// - never retry and never cache
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn request(&self, path: &str, options: RequestOptions) -> Result<Value>;
}

/// One-shot device location capability.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Obtain a single position sample.
    async fn current_position(&self) -> Result<Coordinates>;
}

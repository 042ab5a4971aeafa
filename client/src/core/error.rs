//! # Common Error Types
//!
//! Consolidated error handling for the Nearby client.
//!
//! ## Error Categories
//!
//! - **Request**: backend communication failures. Network errors and
//!   non-success statuses both land here, carrying the best human-readable
//!   message the gateway could extract (the error body's `detail`, or
//!   `"Request failed"`).
//! - **Validation**: required form fields missing, caught before any request.
//! - **Storage**: the persisted credential could not be read or written.
//! - **Config**: invalid startup configuration.
//!
//! A success response with an unparsable body is not an error: the gateway
//! returns an empty JSON object instead.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use nearby::core::error::AppError;
//!
//! let err = AppError::Request("bad email".to_string());
//! assert_eq!(err.to_string(), "Request error: bad email");
//! assert_eq!(err.message(), "bad email");
//! ```

use thiserror::Error;

/// Message used when a failed response carries no usable `detail`.
pub const REQUEST_FAILED: &str = "Request failed";

/// Application-wide error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Backend API communication error (network failure or non-success status).
    #[error("Request error: {0}")]
    Request(String),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credential storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// The bare message, without the category prefix. This is what flows put
    /// into their user-facing `error` and toast state.
    pub fn message(&self) -> &str {
        match self {
            AppError::Request(msg)
            | AppError::Validation(msg)
            | AppError::Storage(msg)
            | AppError::Config(msg) => msg,
        }
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

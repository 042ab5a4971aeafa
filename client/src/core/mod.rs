//! # Core Abstractions
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: Dependency injection traits (`Gateway`, `LocationProvider`)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nearby::core::service::Gateway;
//! use nearby::services::api::ApiClient;
//!
//! // In production: the reqwest-backed client
//! let gateway: Arc<dyn Gateway> = Arc::new(ApiClient::new("http://127.0.0.1:8000"));
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{Gateway, LocationProvider, RequestOptions};

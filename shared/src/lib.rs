//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Nearby client and the places
//! backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Signup, login, federated login and profile DTOs
//!   - **[`dto::places`]**: Nearby search and place result DTOs
//!
//! ## Wire Format
//!
//! - Field names are **snake_case** in Rust and in JSON
//! - Error bodies optionally carry a `detail` string ([`ErrorResponse`])
//! - Response DTOs default missing collections instead of failing
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::LoginRequest;
//!
//! let request = LoginRequest {
//!     email: "alice@example.com".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["email"], "alice@example.com");
//! ```

pub mod dto;

pub use dto::*;

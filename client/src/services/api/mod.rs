//! # Backend API Client Module
//!
//! HTTP client for the places backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports
//! ├── client.rs   - ApiClient (the reqwest-backed Gateway) and response normalization
//! ├── auth.rs     - Signup, login, federated login, current profile
//! └── places.rs   - Nearby search, favorites
//! ```

pub mod auth;
pub mod client;
pub mod places;

pub use client::{normalize_response, ApiClient};

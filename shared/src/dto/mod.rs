//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the places backend.
//!
//! ## Module Organization
//!
//! - [`auth`] - Signup, login, federated login, token and profile DTOs
//! - [`places`] - Coordinates, nearby search request/response, place results
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /places/nearby
//! Content-Type: application/json
//!
//! { "latitude": 12.9716, "longitude": 77.5946, "radius_km": 5 }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "results": [
//!     { "id": "p1", "name": "Cafe", "category": "food",
//!       "distance_km": 1.2, "latitude": 12.97, "longitude": 77.59 }
//!   ]
//! }
//! ```

pub mod auth;
pub mod places;

pub use auth::*;
pub use places::*;

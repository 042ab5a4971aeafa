//! # Flows
//!
//! - [`auth`]: login, signup, federated login
//! - [`discovery`]: location, nearby search, favorites

pub mod auth;
pub mod discovery;

pub use auth::AuthFlow;
pub use discovery::DiscoveryFlow;

//! # External Integrations
//!
//! - [`api`]: the backend gateway and its endpoints
//! - [`session`]: the credential store
//! - [`location`]: device location providers

pub mod api;
pub mod location;
pub mod session;

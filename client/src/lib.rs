//! # Nearby - Library Root
//!
//! Client for a places backend: sign in, find places around a position, and
//! save favorites. This library crate contains all modules used by the
//! binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              nearby (this crate)                       │
//! ├────────────────────────────────────────────────────────┤
//! │  app::AuthFlow       - login / signup / federated      │
//! │  app::DiscoveryFlow  - location, search, favorites     │
//! │  SessionStore        - the one client-held credential  │
//! │  Gateway (ApiClient) - every backend call              │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP + JSON
//!          ▼
//! ┌─────────────────┐
//! │ Places backend  │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: flows, events, toasts and the top-level [`App`]
//! - **core**: [`AppError`] and the injection traits (`Gateway`, `LocationProvider`)
//! - **services**: the reqwest gateway and endpoints, the session store, location providers
//! - **config**: [`ClientConfig`] resolved from the environment
//! - **debug**: `tracing` setup
//! - **utils**: form validation
//!
//! ## Core Concepts
//!
//! ### Single gateway
//!
//! All backend calls go through [`Gateway::request`](crate::core::service::Gateway::request). It
//! normalizes failures into [`AppError::Request`] with the body's `detail` (or
//! `"Request failed"`) and turns an empty success body into `{}`.
//!
//! ### Injected session
//!
//! One [`SessionStore`] is created per app and shared with both flows. The
//! authorization header is derived from it at call time.
//!
//! ### Cooperative concurrency
//!
//! Operations are async and only suspend at network calls and the location
//! lookup. Nothing is cancelled; overlapping searches each commit their
//! results as they complete, last one wins.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nearby::{App, ClientConfig};
//!
//! # async fn run() -> nearby::Result<()> {
//! let app = App::from_config(&ClientConfig::from_env()?)?;
//! app.start().await;
//! app.discovery.search().await?;
//! for place in app.discovery.results() {
//!     println!("{} ({:.1} km)", place.name, place.distance_km);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod utils;

pub use app::{App, AppEvent, AppState, AuthMode, SearchRadius};
pub use config::ClientConfig;
pub use crate::core::{AppError, Result};
pub use services::session::SessionStore;

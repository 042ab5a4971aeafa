//! # Logging
//!
//! `tracing` setup for the binary: [`LogConfig`] from the environment and
//! [`init`] to install the subscriber.

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;

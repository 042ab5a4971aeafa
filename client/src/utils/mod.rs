//! # Utility Functions
//!
//! - **[`validation`]**: Auth form presence checks

pub mod validation;

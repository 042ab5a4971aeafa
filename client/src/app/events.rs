//! # Application Events
//!
//! Results the flows publish for the app to apply (see [`crate::App::process_events`]).

use crate::app::notifications::Toast;
use shared::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new credential replaced the previous one; any held profile is stale
    CredentialChanged,
    /// A credential was established and its profile fetched
    Authenticated(UserProfile),
    /// The session was cleared
    LoggedOut,
    /// A nearby search committed its results
    SearchCompleted { count: usize },
    /// A toast was raised
    Toast(Toast),
}

//! # Event Handler
//!
//! Applies the events published by the flows to [`AppState`](crate::app::state::AppState).

use crate::app::{App, AppEvent};

impl App {
    /// Drain and apply every pending event. Returns how many were applied.
    pub fn process_events(&self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    fn handle_event(&self, event: AppEvent) {
        match event {
            AppEvent::CredentialChanged => {
                tracing::debug!(event = "CredentialChanged", "Dropping profile of previous credential");
                self.state.write().profile = None;
            }
            AppEvent::Authenticated(profile) => {
                tracing::info!(event = "Authenticated", email = %profile.email, "Applying profile");
                self.state.write().profile = Some(profile);
            }
            AppEvent::LoggedOut => {
                tracing::info!(event = "LoggedOut", "Clearing profile");
                self.state.write().profile = None;
            }
            AppEvent::SearchCompleted { count } => {
                tracing::debug!(event = "SearchCompleted", count, "Search results committed");
            }
            AppEvent::Toast(toast) => {
                tracing::debug!(event = "Toast", kind = ?toast.kind, message = %toast.message, "Toast raised");
            }
        }
    }
}

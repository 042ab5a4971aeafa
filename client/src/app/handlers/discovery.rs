//! # Discovery Flow
//!
//! Location lookup, nearby search and the favorite action.
//!
//! Searches are not cancelled or sequenced: when two overlap, each one writes
//! its results as it completes, so the one that completes last wins even if
//! it was issued first.

use crate::app::events::AppEvent;
use crate::app::notifications::NotificationCenter;
use crate::app::state::{DiscoveryState, SearchRadius};
use crate::core::error::Result;
use crate::core::service::{Gateway, LocationProvider};
use crate::services::api::places as api;
use crate::services::session::SessionStore;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{Coordinates, NearbyRequest, PlaceResult};
use std::sync::Arc;

/// Message of the toast shown after a successful favorite.
pub const FAVORITE_SAVED: &str = "Saved to favorites";

pub struct DiscoveryFlow {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
    location: Option<Arc<dyn LocationProvider>>,
    notifications: Arc<NotificationCenter>,
    state: Arc<RwLock<DiscoveryState>>,
    event_tx: Sender<AppEvent>,
}

/// Clears `loading` when a search ends, however it ends.
struct LoadingGuard(Arc<RwLock<DiscoveryState>>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.write().loading = false;
    }
}

impl DiscoveryFlow {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        session: Arc<SessionStore>,
        location: Option<Arc<dyn LocationProvider>>,
        notifications: Arc<NotificationCenter>,
        default_coordinates: Coordinates,
        event_tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            gateway,
            session,
            location,
            notifications,
            state: Arc::new(RwLock::new(DiscoveryState::new(default_coordinates))),
            event_tx,
        }
    }

    /// Snapshot of the flow state.
    pub fn state(&self) -> DiscoveryState {
        self.state.read().clone()
    }

    pub fn results(&self) -> Vec<PlaceResult> {
        self.state.read().results.clone()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.state.read().coordinates
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn set_coordinates(&self, coordinates: Coordinates) {
        self.state.write().coordinates = coordinates;
    }

    pub fn set_radius(&self, radius: SearchRadius) {
        self.state.write().radius = radius;
    }

    /// One-shot location lookup, done once when the flow starts.
    ///
    /// Returns whether the coordinates were overwritten. No provider, a
    /// failing provider, or a second call all leave the defaults in place
    /// without reporting an error.
    pub async fn acquire_location(&self) -> bool {
        {
            let mut state = self.state.write();
            if state.location_requested {
                return false;
            }
            state.location_requested = true;
        }

        let Some(provider) = self.location.clone() else {
            tracing::debug!("No location capability, keeping default coordinates");
            return false;
        };

        match provider.current_position().await {
            Ok(coordinates) if coordinates.is_valid() => {
                tracing::debug!(lat = coordinates.latitude, lon = coordinates.longitude, "Location acquired");
                self.state.write().coordinates = coordinates;
                true
            }
            Ok(coordinates) => {
                tracing::debug!(?coordinates, "Ignoring out-of-range location sample");
                false
            }
            Err(err) => {
                tracing::debug!(error = %err, "Location lookup failed, keeping default coordinates");
                false
            }
        }
    }

    /// Search around the current coordinates within the current radius.
    ///
    /// On success the results are replaced wholesale; on failure the message
    /// is stored in `error` and the previous results stay.
    pub async fn search(&self) -> Result<Vec<PlaceResult>> {
        let request = {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
            NearbyRequest::new(state.coordinates, state.radius.km())
        };
        let _loading = LoadingGuard(Arc::clone(&self.state));

        match api::nearby(self.gateway.as_ref(), &request).await {
            Ok(response) => {
                let count = response.results.len();
                self.state.write().results = response.results.clone();
                tracing::info!(count, radius_km = request.radius_km, "Search completed");
                if self.event_tx.send(AppEvent::SearchCompleted { count }).await.is_err() {
                    tracing::debug!("Event channel closed, search event dropped");
                }
                Ok(response.results)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Search failed");
                self.state.write().error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    /// Register a favorite for the session's user and raise a toast with the outcome.
    ///
    /// Callers gate this on an active session (see [`crate::App::favorite`]).
    pub async fn favorite(&self, place_id: &str) -> Result<()> {
        let result = api::add_favorite(self.gateway.as_ref(), &self.session, place_id).await;

        let toast = match &result {
            Ok(()) => {
                tracing::info!(place_id, "Favorite saved");
                self.notifications.success(FAVORITE_SAVED)
            }
            Err(err) => {
                tracing::warn!(place_id, error = %err, "Favorite failed");
                self.notifications.error(err.message())
            }
        };
        if self.event_tx.send(AppEvent::Toast(toast)).await.is_err() {
            tracing::debug!("Event channel closed, toast event dropped");
        }
        result
    }
}

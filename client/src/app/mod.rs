//! # Application Module
//!
//! Wires the session store, gateway and flows together and owns the
//! top-level state (the signed-in profile).
//!
//! ## Module Structure
//!
//! ```text
//! app/
//! ├── mod.rs            - App: construction, startup, gating, logout
//! ├── state.rs          - AuthForm, DiscoveryState, SearchRadius, AppState
//! ├── events.rs         - AppEvent published by the flows
//! ├── event_handler.rs  - Applies events to AppState
//! ├── notifications.rs  - Toasts with cancellable expiry timers
//! └── handlers/
//!     ├── auth.rs       - AuthFlow
//!     └── discovery.rs  - DiscoveryFlow
//! ```
//!
//! ## Event Flow
//!
//! Flows publish [`AppEvent`]s on an unbounded `async-channel`; the app drains
//! them with [`App::process_events`] after driving an operation. The profile
//! is only ever set from a fetch made with the current credential, and it is
//! cleared together with the credential on logout.

pub mod event_handler;
pub mod events;
pub mod handlers;
pub mod notifications;
pub mod state;

pub use events::AppEvent;
pub use handlers::{AuthFlow, DiscoveryFlow};
pub use notifications::{NotificationCenter, Toast, ToastKind};
pub use state::{AppState, AuthForm, AuthMode, DiscoveryState, SearchRadius};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::{Gateway, LocationProvider};
use crate::services::api::{auth as auth_api, ApiClient};
use crate::services::location::FixedLocation;
use crate::services::session::{FileStorage, SessionStore};
use async_channel::{Receiver, Sender};
use parking_lot::RwLock;
use shared::{Coordinates, UserProfile};
use std::sync::Arc;

pub struct App {
    pub state: Arc<RwLock<AppState>>,
    pub auth: AuthFlow,
    pub discovery: DiscoveryFlow,
    session: Arc<SessionStore>,
    gateway: Arc<dyn Gateway>,
    notifications: Arc<NotificationCenter>,
    event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        session: Arc<SessionStore>,
        location: Option<Arc<dyn LocationProvider>>,
        default_coordinates: Coordinates,
    ) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let notifications = Arc::new(NotificationCenter::new());

        let auth = AuthFlow::new(Arc::clone(&gateway), Arc::clone(&session), event_tx.clone());
        let discovery = DiscoveryFlow::new(
            Arc::clone(&gateway),
            Arc::clone(&session),
            location,
            Arc::clone(&notifications),
            default_coordinates,
            event_tx.clone(),
        );

        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            auth,
            discovery,
            session,
            gateway,
            notifications,
            event_tx,
            event_rx,
        }
    }

    /// Build the production app: reqwest gateway, file-backed session, and a
    /// fixed location provider when the config names a device position.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let gateway: Arc<dyn Gateway> = Arc::new(ApiClient::from_config(config));
        let session = Arc::new(SessionStore::open(FileStorage::in_dir(&config.data_dir)));
        let location = config
            .device_location
            .map(|coordinates| Arc::new(FixedLocation(coordinates)) as Arc<dyn LocationProvider>);

        tracing::info!(
            api_base_url = %config.api_base_url,
            data_dir = %config.data_dir.display(),
            location_available = location.is_some(),
            "App configured"
        );
        Ok(Self::new(gateway, session, location, config.default_coordinates))
    }

    /// Startup: restore the profile of a persisted credential, then run the
    /// one-shot location lookup. Neither step reports failure.
    pub async fn start(&self) {
        self.restore_profile().await;
        self.discovery.acquire_location().await;
        self.process_events();
    }

    /// Fetch the profile for an already stored credential.
    ///
    /// A failure (expired token, backend down) is a no-op. The
    /// credential stays and the app remains without a profile until the next
    /// successful authentication.
    pub async fn restore_profile(&self) -> Option<UserProfile> {
        if !self.session.is_authenticated() {
            return None;
        }

        match auth_api::current_profile(self.gateway.as_ref(), &self.session).await {
            Ok(profile) => {
                tracing::info!(email = %profile.email, "Session restored");
                self.state.write().profile = Some(profile.clone());
                Some(profile)
            }
            Err(err) => {
                tracing::debug!(error = %err, "Profile refresh failed, ignoring");
                None
            }
        }
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().profile.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Favorite a place if someone is signed in. Anonymous visitors get no
    /// request and no toast; the return value says whether the action ran.
    pub async fn favorite(&self, place_id: &str) -> bool {
        if !self.session.is_authenticated() {
            tracing::debug!(place_id, "Favorite ignored for anonymous visitor");
            return false;
        }
        if let Err(err) = self.discovery.favorite(place_id).await {
            tracing::debug!(place_id, error = %err, "Favorite failed, outcome shown as toast");
        }
        self.process_events();
        true
    }

    /// Drop the credential and the profile together.
    pub fn logout(&self) -> Result<()> {
        let cleared = self.session.clear();
        self.state.write().profile = None;
        if self.event_tx.try_send(AppEvent::LoggedOut).is_err() {
            tracing::debug!("Event channel closed, logout event dropped");
        }
        self.process_events();
        tracing::info!("Logged out");
        cleared
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.notifications.shutdown();
    }
}

//! # Authentication Flow
//!
//! Login, signup and federated login, each followed by the profile lookup.
//!
//! Session establishment is best-effort: once the backend has issued a
//! credential it is saved, and a failing profile fetch afterwards does not
//! roll it back. The failure still lands in the form's `error`.

use crate::app::events::AppEvent;
use crate::app::state::{AuthForm, AuthMode};
use crate::core::error::{AppError, Result};
use crate::core::service::Gateway;
use crate::services::api::auth as api;
use crate::services::session::SessionStore;
use crate::utils::validation::validate_auth_form;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{LoginRequest, SignupRequest, TokenResponse, UserProfile};
use std::sync::Arc;

pub struct AuthFlow {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
    form: Arc<RwLock<AuthForm>>,
    event_tx: Sender<AppEvent>,
}

impl AuthFlow {
    pub fn new(gateway: Arc<dyn Gateway>, session: Arc<SessionStore>, event_tx: Sender<AppEvent>) -> Self {
        Self {
            gateway,
            session,
            form: Arc::new(RwLock::new(AuthForm::default())),
            event_tx,
        }
    }

    /// Snapshot of the form.
    pub fn form(&self) -> AuthForm {
        self.form.read().clone()
    }

    pub fn mode(&self) -> AuthMode {
        self.form.read().mode
    }

    pub fn error(&self) -> Option<String> {
        self.form.read().error.clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.form.write().name = name.into();
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.form.write().email = email.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.form.write().password = password.into();
    }

    /// Switch between login and signup. Fields and error are left as they are.
    pub fn toggle_mode(&self) {
        let mut form = self.form.write();
        form.mode = form.mode.toggled();
    }

    /// Submit the form in its current mode.
    ///
    /// Missing fields fail before any request is made.
    pub async fn submit(&self) -> Result<UserProfile> {
        let form = {
            let mut form = self.form.write();
            form.error = None;
            form.clone()
        };

        if let Err(err) = validate_auth_form(&form) {
            return Err(self.record_failure(err));
        }

        let issued = match form.mode {
            AuthMode::Signup => {
                let request = SignupRequest {
                    name: form.name,
                    email: form.email,
                    password: form.password,
                };
                api::signup(self.gateway.as_ref(), &request).await
            }
            AuthMode::Login => {
                let request = LoginRequest {
                    email: form.email,
                    password: form.password,
                };
                api::login(self.gateway.as_ref(), &request).await
            }
        };

        match issued {
            Ok(token) => self.establish_session(token).await,
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Exchange an opaque identity assertion (a Google ID token) for a session.
    pub async fn federated_login(&self, id_token: &str) -> Result<UserProfile> {
        self.form.write().error = None;

        match api::google_login(self.gateway.as_ref(), id_token).await {
            Ok(token) => self.establish_session(token).await,
            Err(err) => Err(self.record_failure(err)),
        }
    }

    /// Save the credential, then fetch the profile with the derived header.
    async fn establish_session(&self, issued: TokenResponse) -> Result<UserProfile> {
        if let Err(err) = self.session.save(&issued.token) {
            // The in-memory credential is set even when persisting failed.
            tracing::warn!(error = %err, "Credential not persisted, session lasts until exit");
        }
        if self.event_tx.send(AppEvent::CredentialChanged).await.is_err() {
            tracing::debug!("Event channel closed, credential event dropped");
        }

        let profile = match api::current_profile(self.gateway.as_ref(), &self.session).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(error = %err, "Profile fetch failed after authentication, keeping credential");
                return Err(self.record_failure(err));
            }
        };

        tracing::info!(email = %profile.email, "Authenticated");
        if self.event_tx.send(AppEvent::Authenticated(profile.clone())).await.is_err() {
            tracing::debug!("Event channel closed, authenticated event dropped");
        }
        Ok(profile)
    }

    fn record_failure(&self, err: AppError) -> AppError {
        tracing::info!(error = %err, "Authentication failed");
        self.form.write().error = Some(err.message().to_string());
        err
    }
}

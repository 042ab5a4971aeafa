//! # Authentication Endpoints
//!
//! Signup, login, federated login and the current-profile lookup.

use crate::core::error::{AppError, Result};
use crate::core::service::{Gateway, RequestOptions};
use crate::services::session::SessionStore;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{GoogleLoginRequest, LoginRequest, SignupRequest, TokenResponse, UserProfile};

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";
pub const GOOGLE_PATH: &str = "/auth/google";
pub const PROFILE_PATH: &str = "/users/me";

/// Sign up a new user.
#[tracing::instrument(skip(gateway, request), fields(email = %request.email))]
pub async fn signup(gateway: &dyn Gateway, request: &SignupRequest) -> Result<TokenResponse> {
    tracing::info!("Attempting signup");
    let value = gateway
        .request(SIGNUP_PATH, RequestOptions::post().json(request))
        .await?;
    decode(value)
}

/// Login with email and password.
#[tracing::instrument(skip(gateway, request), fields(email = %request.email))]
pub async fn login(gateway: &dyn Gateway, request: &LoginRequest) -> Result<TokenResponse> {
    tracing::info!("Attempting login");
    let value = gateway
        .request(LOGIN_PATH, RequestOptions::post().json(request))
        .await?;
    decode(value)
}

/// Exchange a Google identity assertion for a credential.
#[tracing::instrument(skip_all)]
pub async fn google_login(gateway: &dyn Gateway, id_token: &str) -> Result<TokenResponse> {
    tracing::info!("Attempting federated login");
    let request = GoogleLoginRequest {
        id_token: id_token.to_string(),
    };
    let value = gateway
        .request(GOOGLE_PATH, RequestOptions::post().json(&request))
        .await?;
    decode(value)
}

/// Fetch the profile of whoever the session's credential belongs to.
///
/// The authorization header is derived here, at call time.
pub async fn current_profile(gateway: &dyn Gateway, session: &SessionStore) -> Result<UserProfile> {
    let value = gateway
        .request(PROFILE_PATH, RequestOptions::get().headers(session.auth_header()))
        .await?;
    decode(value)
}

/// Decode a successful gateway value into a typed response.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, "Response decode error");
        AppError::Request(format!("Malformed response: {}", e))
    })
}

//! # Application State Types
//!
//! State owned by the app and its flows: the auth form, discovery state and
//! the top-level profile slot.

use shared::{Coordinates, PlaceResult, UserProfile};

/// Which form the auth flow is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

/// Auth form fields and the last failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

/// Radius of a nearby search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchRadius {
    Km1,
    #[default]
    Km5,
    Km10,
    Km25,
}

impl SearchRadius {
    pub fn all() -> &'static [SearchRadius] {
        &[
            SearchRadius::Km1,
            SearchRadius::Km5,
            SearchRadius::Km10,
            SearchRadius::Km25,
        ]
    }

    pub fn km(self) -> u32 {
        match self {
            SearchRadius::Km1 => 1,
            SearchRadius::Km5 => 5,
            SearchRadius::Km10 => 10,
            SearchRadius::Km25 => 25,
        }
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = crate::core::AppError;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        SearchRadius::all()
            .iter()
            .copied()
            .find(|radius| radius.km() == km)
            .ok_or_else(|| {
                crate::core::AppError::Validation(format!(
                    "Radius must be one of 1, 5, 10 or 25 km, got {}",
                    km
                ))
            })
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km", self.km())
    }
}

/// State of the discovery flow.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryState {
    pub coordinates: Coordinates,
    pub radius: SearchRadius,
    pub loading: bool,
    /// Replaced wholesale by every completed search.
    pub results: Vec<PlaceResult>,
    pub error: Option<String>,
    /// Set once the one-shot location lookup has been attempted.
    pub location_requested: bool,
}

impl DiscoveryState {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            radius: SearchRadius::default(),
            loading: false,
            results: Vec::new(),
            error: None,
            location_requested: false,
        }
    }
}

/// Top-level application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Profile of the signed-in user, fetched with the current credential.
    pub profile: Option<UserProfile>,
}

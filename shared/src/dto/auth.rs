use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Federated (Google) login request carrying the identity assertion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// Successful authentication response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

/// Profile of the authenticated user, as returned by `GET /users/me`.
///
/// Fields the client does not know about are kept in `extra` so nothing the
/// backend sends is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error body. `detail` is usually a string but backends are free to send
/// structured validation errors there.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// The human-readable message, when `detail` is a non-empty string.
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            Some(Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

//! # Client Configuration
//!
//! Resolved once at startup from environment variables (after `.env` is
//! loaded, see [`ClientConfig::from_env`]).
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NEARBY_API_URL` | derived | Backend base URL override |
//! | `NEARBY_HOST` | `127.0.0.1` | Host the base URL is derived from |
//! | `NEARBY_DATA_DIR` | `.nearby` | Where the credential file lives |
//! | `NEARBY_TIMEOUT_SECS` | `10` | Per-request timeout |
//! | `NEARBY_DEFAULT_LAT` / `NEARBY_DEFAULT_LON` | `12.9716` / `77.5946` | Default search position |
//! | `NEARBY_LOCATION` | unset | Device position `"lat,lon"`; unset means no location capability |

use crate::core::error::{AppError, Result};
use crate::services::location::parse_coordinates;
use shared::Coordinates;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Port the backend listens on when the URL is derived from the host.
pub const DEFAULT_API_PORT: u16 = 8000;

pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(12.9716, 77.5946);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub data_dir: PathBuf,
    pub request_timeout: Duration,
    pub default_coordinates: Coordinates,
    /// Device position, when a location capability is available.
    pub device_location: Option<Coordinates>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: resolve_base_url(None, None),
            data_dir: PathBuf::from(".nearby"),
            request_timeout: Duration::from_secs(10),
            default_coordinates: DEFAULT_COORDINATES,
            device_location: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }

        let api_base_url = resolve_base_url(
            env::var("NEARBY_API_URL").ok(),
            env::var("NEARBY_HOST").ok(),
        );

        let data_dir = env::var("NEARBY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".nearby"));

        let request_timeout = match env::var("NEARBY_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(raw.parse().map_err(|e| {
                AppError::Config(format!("NEARBY_TIMEOUT_SECS must be a whole number: {}", e))
            })?),
            Err(_) => Duration::from_secs(10),
        };

        let default_coordinates = Coordinates::new(
            env_f64("NEARBY_DEFAULT_LAT", DEFAULT_COORDINATES.latitude)?,
            env_f64("NEARBY_DEFAULT_LON", DEFAULT_COORDINATES.longitude)?,
        );

        let device_location = match env::var("NEARBY_LOCATION") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_coordinates(&raw)?),
            _ => None,
        };

        let config = Self {
            api_base_url,
            data_dir,
            request_timeout,
            default_coordinates,
            device_location,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API base URL must start with http:// or https://, got {}",
                self.api_base_url
            )));
        }
        if !self.default_coordinates.is_valid() {
            return Err(AppError::Config("default coordinates out of range".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config("request timeout must be positive".to_string()));
        }
        Ok(())
    }
}

/// An explicit override wins; otherwise the URL is derived from the host.
pub fn resolve_base_url(override_url: Option<String>, host: Option<String>) -> String {
    match override_url.filter(|url| !url.trim().is_empty()) {
        Some(url) => url.trim().trim_end_matches('/').to_string(),
        None => {
            let host = host
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| "127.0.0.1".to_string());
            format!("http://{}:{}", host.trim(), DEFAULT_API_PORT)
        }
    }
}

fn env_f64(name: &str, default: f64) -> Result<f64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be a number: {}", name, e))),
        Err(_) => Ok(default),
    }
}

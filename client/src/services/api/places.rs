//! # Places Endpoints
//!
//! Nearby search and favorites.

use super::auth::decode;
use crate::core::error::Result;
use crate::core::service::{Gateway, RequestOptions};
use crate::services::session::SessionStore;
use shared::{NearbyRequest, NearbyResponse};

pub const NEARBY_PATH: &str = "/places/nearby";
pub const FAVORITES_PATH: &str = "/users/me/favorites";

/// Search for places within `radius_km` of a coordinate pair.
#[tracing::instrument(skip(gateway), fields(lat = request.latitude, lon = request.longitude, radius_km = request.radius_km))]
pub async fn nearby(gateway: &dyn Gateway, request: &NearbyRequest) -> Result<NearbyResponse> {
    let start = std::time::Instant::now();
    let value = gateway
        .request(NEARBY_PATH, RequestOptions::post().json(request))
        .await?;
    let response: NearbyResponse = decode(value)?;

    tracing::debug!(
        count = response.results.len(),
        duration_ms = start.elapsed().as_millis(),
        "Nearby search returned"
    );
    Ok(response)
}

/// Register `place_id` as a favorite of the session's user.
///
/// The response body is ignored; the backend may return anything or nothing.
#[tracing::instrument(skip(gateway, session))]
pub async fn add_favorite(gateway: &dyn Gateway, session: &SessionStore, place_id: &str) -> Result<()> {
    gateway
        .request(
            &favorite_path(place_id),
            RequestOptions::post().headers(session.auth_header()),
        )
        .await?;
    Ok(())
}

pub fn favorite_path(place_id: &str) -> String {
    format!("{}?place_id={}", FAVORITES_PATH, place_id)
}

use serde::{Deserialize, Deserializer, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Body of `POST /places/nearby`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: u32,
}

impl NearbyRequest {
    pub fn new(coordinates: Coordinates, radius_km: u32) -> Self {
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            radius_km,
        }
    }
}

/// A single place returned by a nearby search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub distance_km: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Response of `POST /places/nearby`. A missing or null `results` field means no results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NearbyResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<PlaceResult>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PlaceResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PlaceResult>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_results_is_empty() {
        let response: NearbyResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.results.is_empty());

        let null: NearbyResponse = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(null.results.is_empty());
    }

    #[test]
    fn test_nearby_request_wire_shape() {
        let request = NearbyRequest::new(Coordinates::new(12.9716, 77.5946), 5);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"latitude": 12.9716, "longitude": 77.5946, "radius_km": 5})
        );
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinates::new(12.9716, 77.5946).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }
}

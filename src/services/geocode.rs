//! Reverse geocoding service
//!
//! Turns raw device coordinates into human-readable place labels using a
//! Nominatim-compatible endpoint. This service only produces labels; the
//! coordinate fallback on failure is the resolver's policy, not ours.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::LocationConfig;
use crate::models::Coordinates;
use crate::utils::errors::{VartaError, GeoError, GeoResult, Result};

/// Address components of a reverse geocoding response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodeAddress {
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Reverse geocoding response structure
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub address: GeocodeAddress,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Nominatim reports failures inside a 200 body
    #[serde(default)]
    pub error: Option<String>,
}

/// Labels derived from one geocoding lookup
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLabels {
    /// Short label, neighbourhood preferred over city over state
    pub display_location: String,
    /// Longer label, city preferred; used to scope the news feed
    pub full_location: String,
}

/// Reverse geocoding client with its own bounded timeout
#[derive(Debug, Clone)]
pub struct GeocodeService {
    client: Client,
    config: LocationConfig,
}

impl GeocodeService {
    /// Create a new GeocodeService instance
    pub fn new(config: LocationConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.geocode_timeout_seconds))
            .user_agent(user_agent.to_string())
            .build()
            .map_err(VartaError::Http)?;

        Ok(Self { client, config })
    }

    /// Look up place labels for the given coordinates
    pub async fn reverse(&self, coordinates: Coordinates) -> GeoResult<PlaceLabels> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.config.geocode_url.trim_end_matches('/'),
            coordinates.latitude,
            coordinates.longitude
        );

        debug!(url = %url, "Reverse geocoding lookup");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeoError::Timeout
            } else if e.is_connect() {
                GeoError::ServiceUnavailable
            } else {
                GeoError::RequestFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeoError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let geocode: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeoError::InvalidResponse(e.to_string()))?;

        if let Some(error) = geocode.error {
            return Err(GeoError::InvalidResponse(error));
        }

        Self::reduce(&geocode).ok_or_else(|| {
            GeoError::InvalidResponse("No usable address components".to_string())
        })
    }

    /// Reduce address components to the two labels the app shows
    fn reduce(geocode: &GeocodeResponse) -> Option<PlaceLabels> {
        let address = &geocode.address;

        let display_location = address
            .neighbourhood
            .clone()
            .or_else(|| address.suburb.clone())
            .or_else(|| address.city.clone())
            .or_else(|| address.town.clone())
            .or_else(|| address.state.clone());

        let full_location = address
            .city
            .clone()
            .or_else(|| address.town.clone())
            .or_else(|| address.village.clone())
            .or_else(|| address.state_district.clone())
            .or_else(|| address.state.clone());

        match (display_location, full_location) {
            (Some(display_location), Some(full_location)) => Some(PlaceLabels {
                display_location,
                full_location,
            }),
            (Some(only), None) | (None, Some(only)) => Some(PlaceLabels {
                display_location: only.clone(),
                full_location: only,
            }),
            (None, None) => geocode.display_name.clone().map(|name| PlaceLabels {
                display_location: name.clone(),
                full_location: name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(address: GeocodeAddress) -> GeocodeResponse {
        GeocodeResponse {
            address,
            display_name: None,
            error: None,
        }
    }

    #[test]
    fn test_reduce_prefers_neighbourhood_for_display() {
        let labels = GeocodeService::reduce(&response(GeocodeAddress {
            neighbourhood: Some("Banjara Hills".to_string()),
            city: Some("Hyderabad".to_string()),
            state: Some("Telangana".to_string()),
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(labels.display_location, "Banjara Hills");
        assert_eq!(labels.full_location, "Hyderabad");
    }

    #[test]
    fn test_reduce_falls_back_to_state() {
        let labels = GeocodeService::reduce(&response(GeocodeAddress {
            state: Some("Andhra Pradesh".to_string()),
            ..Default::default()
        }))
        .unwrap();

        assert_eq!(labels.display_location, "Andhra Pradesh");
        assert_eq!(labels.full_location, "Andhra Pradesh");
    }

    #[test]
    fn test_reduce_uses_display_name_when_address_is_empty() {
        let geocode = GeocodeResponse {
            address: GeocodeAddress::default(),
            display_name: Some("Somewhere, India".to_string()),
            error: None,
        };
        let labels = GeocodeService::reduce(&geocode).unwrap();
        assert_eq!(labels.full_location, "Somewhere, India");
    }

    #[test]
    fn test_reduce_empty_response_is_none() {
        assert!(GeocodeService::reduce(&response(GeocodeAddress::default())).is_none());
    }
}

//! Location types shared by the resolver and the feed query layer

use serde::{Deserialize, Serialize};
use crate::utils::helpers::format_coordinates;

/// Raw device coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolved place labels for a coordinate fix. Transient — recomputed on
/// each permission-granted fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub latitude: f64,
    pub longitude: f64,
    /// Short label, neighbourhood preferred over city over state
    pub display_location: String,
    /// Longer label, city preferred; used as the district filter
    pub full_location: String,
}

impl LocationSnapshot {
    /// Snapshot used when reverse geocoding fails: both labels fall back
    /// to the raw coordinates at six decimal places.
    pub fn from_raw_coordinates(coordinates: Coordinates) -> Self {
        let label = format_coordinates(coordinates.latitude, coordinates.longitude);
        Self {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            display_location: label.clone(),
            full_location: label,
        }
    }
}

//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub location: LocationConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `https://api.varta.news/api/`
    pub base_url: String,
    /// Fixed per-request timeout; requests past it count as network errors
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// On-device storage configuration (token and user record)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the persisted session files
    pub dir: String,
}

/// Location resolution configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Reverse geocoding endpoint, Nominatim-compatible
    pub geocode_url: String,
    pub geocode_timeout_seconds: u64,
    /// Bounded timeout for the position fetch itself
    pub fetch_timeout_seconds: u64,
    /// Cache tolerance for a previously obtained position
    pub maximum_age_seconds: u64,
    /// Fixed coordinates for the built-in static provider, if any
    pub static_position: Option<StaticPosition>,
}

/// Fixed coordinates used by the static position provider
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct StaticPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    /// District-filtered feed; when off, queries never carry a filter
    pub location_filtering: bool,
    /// Comments, likes, shares, bookmarks
    pub engagement: bool,
    /// News review, reporter management, ticket resolution
    pub admin_panel: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("VARTA").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::VartaError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api/".to_string(),
                timeout_seconds: 10,
                user_agent: "VartaClient/0.1".to_string(),
            },
            storage: StorageConfig {
                dir: ".varta".to_string(),
            },
            location: LocationConfig {
                geocode_url: "https://nominatim.openstreetmap.org".to_string(),
                geocode_timeout_seconds: 10,
                fetch_timeout_seconds: 15,
                maximum_age_seconds: 30,
                static_position: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                location_filtering: true,
                engagement: true,
                admin_panel: true,
            },
        }
    }
}

//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{VartaError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_storage_config(&settings.storage)?;
    validate_location_config(&settings.location)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(VartaError::Config(
            "API base URL is required".to_string()
        ));
    }

    let parsed = url::Url::parse(&config.base_url)
        .map_err(|e| VartaError::Config(format!("Invalid API base URL: {}", e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(VartaError::Config(
            format!("API base URL must be http(s), got '{}'", parsed.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(VartaError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate storage configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.dir.is_empty() {
        return Err(VartaError::Config(
            "Storage directory is required".to_string()
        ));
    }

    Ok(())
}

/// Validate location resolution configuration
fn validate_location_config(config: &super::LocationConfig) -> Result<()> {
    if config.geocode_url.is_empty() {
        return Err(VartaError::Config(
            "Geocoding URL is required".to_string()
        ));
    }

    url::Url::parse(&config.geocode_url)
        .map_err(|e| VartaError::Config(format!("Invalid geocoding URL: {}", e)))?;

    if config.fetch_timeout_seconds == 0 || config.geocode_timeout_seconds == 0 {
        return Err(VartaError::Config(
            "Location timeouts must be greater than 0".to_string()
        ));
    }

    if let Some(position) = &config.static_position {
        if !(-90.0..=90.0).contains(&position.latitude)
            || !(-180.0..=180.0).contains(&position.longitude)
        {
            return Err(VartaError::Config(
                "Static position is out of range".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    let level = config.level.split(',').next().unwrap_or("").trim();

    if !valid_levels.contains(&level) && !level.contains('=') {
        return Err(VartaError::Config(
            format!("Invalid log level '{}'", config.level)
        ));
    }

    if config.file_path.is_empty() {
        return Err(VartaError::Config(
            "Log file path is required".to_string()
        ));
    }

    Ok(())
}

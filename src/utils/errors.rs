//! Error handling for the Varta client
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.
//!
//! Expected backend failures (HTTP 4xx/5xx, network failures) are not
//! errors in this sense at all — they are folded into the API envelope
//! by the client wrapper. `VartaError` covers everything else: local
//! storage, configuration, geocoding, invalid transitions.

use thiserror::Error;

/// Main error type for the Varta client
#[derive(Error, Debug)]
pub enum VartaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding error: {0}")]
    Geo(#[from] GeoError),

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Reverse geocoding provider specific errors
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    #[error("Geocoding request timed out")]
    Timeout,

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    #[error("Geocoding service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for Varta client operations
pub type Result<T> = std::result::Result<T, VartaError>;

/// Result type alias for geocoding operations
pub type GeoResult<T> = std::result::Result<T, GeoError>;

impl VartaError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            VartaError::Config(_) => false,
            VartaError::Storage(_) => true,
            VartaError::Http(_) => true,
            VartaError::Geo(_) => true,
            VartaError::PermissionDenied => false,
            VartaError::PositionUnavailable(_) => true,
            VartaError::Serialization(_) => false,
            VartaError::UrlParse(_) => false,
            VartaError::InvalidStateTransition { .. } => false,
            VartaError::InvalidInput(_) => false,
            VartaError::NotAuthenticated => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VartaError::Config(_) => ErrorSeverity::Critical,
            VartaError::PermissionDenied => ErrorSeverity::Warning,
            VartaError::PositionUnavailable(_) => ErrorSeverity::Warning,
            VartaError::InvalidInput(_) => ErrorSeverity::Info,
            VartaError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            VartaError::NotAuthenticated => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

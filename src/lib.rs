//! Varta client
//!
//! Client SDK for the Varta news publishing platform: a uniform API
//! envelope over the backend REST surface, a location resolver that
//! scopes the news feed to the reader's district, a persisted session
//! container, and the status workflow state machines for news,
//! reporters and support tickets.

pub mod config;
pub mod api;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{VartaError, Result};

// Re-export main components for easy access
pub use api::{ApiClient, ApiEnvelope, ErrorCode, AuthEvent};
pub use services::ServiceFactory;
pub use state::{AppContext, SessionStore, SessionStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

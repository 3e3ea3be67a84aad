//! Backend API access
//!
//! The HTTP client wrapper and the canonical result envelope every call
//! resolves to.

pub mod client;
pub mod envelope;

pub use client::{ApiClient, AuthEvent, AuthMode};
pub use envelope::{ApiEnvelope, ErrorCode, NETWORK_ERROR_MESSAGE};

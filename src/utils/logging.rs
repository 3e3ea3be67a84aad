//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the Varta client.

use tracing::{info, warn, debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "varta.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log an outgoing API request with its request id
pub fn log_api_request(request_id: &str, method: &str, path: &str) {
    debug!(
        request_id = request_id,
        method = method,
        path = path,
        "API request issued"
    );
}

/// Log API failures with context
pub fn log_api_error(request_id: &str, path: &str, status: Option<u16>, message: &str) {
    error!(
        request_id = request_id,
        path = path,
        status = status,
        message = message,
        "API request failed"
    );
}

/// Log session lifecycle events
pub fn log_session_event(event: &str, user_id: Option<&str>) {
    info!(
        event = event,
        user_id = user_id,
        "Session event"
    );
}

/// Log entity workflow transitions
pub fn log_workflow_transition(entity: &str, entity_id: &str, from: &str, to: &str) {
    info!(
        entity = entity,
        entity_id = entity_id,
        from = from,
        to = to,
        "Workflow transition applied"
    );
}

/// Log location resolution events
pub fn log_location_event(event: &str, detail: Option<&str>) {
    if event == "permission_denied" || event == "fetch_failed" {
        warn!(event = event, detail = detail, "Location resolution degraded");
    } else {
        debug!(event = event, detail = detail, "Location resolution event");
    }
}

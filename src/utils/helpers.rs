//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use chrono::{DateTime, Utc, Duration};
use uuid::Uuid;

/// Generate a new request id (UUID v4)
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format coordinates the way the feed displays them when geocoding
/// is unavailable: six decimal places, comma separated.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a timestamp for user display (relative time)
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let diff = now.signed_duration_since(timestamp);

    if diff < Duration::minutes(1) {
        "just now".to_string()
    } else if diff < Duration::hours(1) {
        format!("{} minutes ago", diff.num_minutes())
    } else if diff < Duration::days(1) {
        format!("{} hours ago", diff.num_hours())
    } else if diff < Duration::weeks(1) {
        format!("{} days ago", diff.num_days())
    } else {
        format_timestamp(timestamp)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    let pattern = match regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$") {
        Ok(re) => re,
        Err(_) => return false,
    };
    pattern.is_match(email)
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.len() >= 10
}

/// Extract hashtags from free-form article tag text
pub fn extract_hashtags(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.starts_with('#') && word.len() > 1)
        .map(|tag| tag[1..].to_lowercase())
        .collect()
}

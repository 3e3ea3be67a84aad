//! Canonical API result envelope
//!
//! Every backend call resolves to an [`ApiEnvelope`], on success and on
//! handled failure alike. The backend itself is inconsistent about its
//! response shape (`{message, error, data}` in newer endpoints,
//! `{success, data}` in older ones, bare payloads elsewhere);
//! [`normalize_body`] is the single place where those shapes are folded
//! into the canonical one, so call sites never sniff response shapes.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message used when no response was received at all
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Machine-readable error category carried by failure envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NetworkError,
    HttpError,
    ValidationError,
    PermissionDenied,
    Unauthorized,
}

/// Uniform result of every client-facing API function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub message: String,
    pub error: bool,
    pub data: Option<T>,
    /// HTTP status of a failed response, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope with a payload
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            message: message.into(),
            error: false,
            data,
            status: None,
            code: None,
        }
    }

    /// Failure envelope for a handled error
    pub fn failure(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            error: true,
            data: None,
            status: None,
            code: Some(code),
        }
    }

    /// Failure envelope for an HTTP error response
    pub fn http_failure(message: impl Into<String>, status: u16) -> Self {
        let code = if status == 401 {
            ErrorCode::Unauthorized
        } else {
            ErrorCode::HttpError
        };
        Self {
            message: message.into(),
            error: true,
            data: None,
            status: Some(status),
            code: Some(code),
        }
    }

    /// Failure envelope when no response was received
    pub fn network_failure() -> Self {
        Self::failure(NETWORK_ERROR_MESSAGE, ErrorCode::NetworkError)
    }

    /// Failure envelope for a client-side validation error. These never
    /// reach the network layer.
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self::failure(message, ErrorCode::ValidationError)
    }

    pub fn is_success(&self) -> bool {
        !self.error
    }

    /// Map the payload type, keeping the rest of the envelope
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        ApiEnvelope {
            message: self.message,
            error: self.error,
            data: self.data.map(f),
            status: self.status,
            code: self.code,
        }
    }
}

impl ApiEnvelope<Value> {
    /// Decode the untyped payload into the caller's type. A payload that
    /// does not match becomes a failure envelope, not a panic.
    pub fn decode<T: DeserializeOwned>(self) -> ApiEnvelope<T> {
        let ApiEnvelope { message, error, data, status, code } = self;
        match data {
            None | Some(Value::Null) => ApiEnvelope { message, error, data: None, status, code },
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(decoded) => ApiEnvelope { message, error, data: Some(decoded), status, code },
                Err(e) => ApiEnvelope {
                    message: format!("Unexpected response shape: {}", e),
                    error: true,
                    data: None,
                    status,
                    code,
                },
            },
        }
    }
}

/// The two envelope shapes the backend actually produces
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEnvelope {
    Flagged {
        error: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        data: Option<Value>,
    },
    Succeeded {
        success: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        data: Option<Value>,
    },
}

/// Fold a 2xx response body into the canonical envelope.
///
/// A body that carries the backend's own `error` flag is trusted as-is.
/// A `{success, data}` body is remapped. Anything else becomes a
/// synthetic success envelope whose payload is the body's `data` field,
/// or the whole body when there is none.
pub fn normalize_body(body: Value) -> ApiEnvelope<Value> {
    if let Ok(raw) = serde_json::from_value::<RawEnvelope>(body.clone()) {
        return match raw {
            RawEnvelope::Flagged { error, message, data } => ApiEnvelope {
                message: message.unwrap_or_else(|| default_message(error)),
                error,
                data: non_null(data),
                status: None,
                code: if error { Some(ErrorCode::HttpError) } else { None },
            },
            RawEnvelope::Succeeded { success, message, data } => ApiEnvelope {
                message: message.unwrap_or_else(|| default_message(!success)),
                error: !success,
                data: non_null(data),
                status: None,
                code: if success { None } else { Some(ErrorCode::HttpError) },
            },
        };
    }

    // Bare payload: synthesize the envelope around it
    let message = body
        .as_object()
        .and_then(|obj| obj.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("Success")
        .to_string();
    let data = match body
        .as_object()
        .and_then(|obj| obj.get("data"))
        .cloned()
    {
        Some(inner) => non_null(Some(inner)),
        None => non_null(Some(body)),
    };

    ApiEnvelope {
        message,
        error: false,
        data,
        status: None,
        code: None,
    }
}

fn default_message(error: bool) -> String {
    if error {
        "Request failed".to_string()
    } else {
        "Success".to_string()
    }
}

fn non_null(value: Option<Value>) -> Option<Value> {
    match value {
        Some(Value::Null) | None => None,
        other => other,
    }
}

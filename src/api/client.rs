//! HTTP client wrapper for the backend REST API
//!
//! This is the single transport used by every service. It attaches the
//! bearer token, enforces the fixed per-request timeout, folds transport
//! and HTTP failures into the canonical envelope, and clears the stored
//! token on a 401 before handing the failure back to the caller.
//! Navigation after a 401 is the caller's job; the client only publishes
//! an [`AuthEvent`] on its broadcast channel.

use std::sync::Arc;
use std::time::Duration;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use url::Url;

use crate::config::Settings;
use crate::state::storage::SessionStorage;
use crate::utils::errors::{VartaError, Result};
use crate::utils::helpers::generate_request_id;
use crate::utils::logging::{log_api_request, log_api_error};
use super::envelope::{ApiEnvelope, normalize_body};

/// Auth-related events published by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// A 401 was received; the stored token has been cleared
    Unauthorized,
}

/// Whether a request carries the stored bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Attach `Authorization: Bearer <token>` when a token is stored.
    /// A missing token is not an error; the backend decides.
    Bearer,
    /// Login/register: never attach a token
    Skip,
}

/// HTTP client wrapper producing canonical envelopes
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    storage: Arc<SessionStorage>,
    auth_events: broadcast::Sender<AuthEvent>,
}

impl ApiClient {
    /// Create a new ApiClient from settings
    pub fn new(settings: &Settings, storage: Arc<SessionStorage>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(settings.api.user_agent.clone())
            .build()
            .map_err(VartaError::Http)?;

        let base_url = Url::parse(&settings.api.base_url)?;
        let (auth_events, _) = broadcast::channel(16);

        Ok(Self {
            http,
            base_url,
            storage,
            auth_events,
        })
    }

    /// Subscribe to auth events (401 token clearing). The application
    /// root consumes this to leave the authenticated surface.
    pub fn subscribe_auth_events(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_events.subscribe()
    }

    /// GET with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.get(url).query(query);
                self.send(request, AuthMode::Bearer, Method::GET, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// POST with a JSON body
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        auth: AuthMode,
    ) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.post(url).json(body);
                self.send(request, auth, Method::POST, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// POST with no body (engagement toggles, query-string endpoints)
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.post(url);
                self.send(request, AuthMode::Bearer, Method::POST, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// POST a multipart form (news upload)
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.post(url).multipart(form);
                self.send(request, AuthMode::Bearer, Method::POST, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// PUT with a JSON body
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.put(url).json(body);
                self.send(request, AuthMode::Bearer, Method::PUT, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// PUT with no body (status updates driven by the query string)
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.put(url);
                self.send(request, AuthMode::Bearer, Method::PUT, path).await
            }
            Err(envelope) => envelope,
        }
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<T> {
        match self.endpoint(path) {
            Ok(url) => {
                let request = self.http.delete(url);
                self.send(request, AuthMode::Bearer, Method::DELETE, path).await
            }
            Err(envelope) => envelope,
        }
    }

    fn endpoint<T>(&self, path: &str) -> std::result::Result<Url, ApiEnvelope<T>> {
        self.base_url.join(path.trim_start_matches('/')).map_err(|e| {
            warn!(path = path, error = %e, "Invalid API path");
            ApiEnvelope::validation_failure(format!("Invalid API path: {}", e))
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
        auth: AuthMode,
        method: Method,
        path: &str,
    ) -> ApiEnvelope<T> {
        let request_id = generate_request_id();
        request = request.header("X-Request-Id", request_id.as_str());

        if auth == AuthMode::Bearer {
            match self.storage.load_token().await {
                Ok(Some(token)) => {
                    request = request.bearer_auth(token);
                }
                Ok(None) => {}
                Err(e) => {
                    // Proceed unauthenticated; the backend decides.
                    warn!(error = %e, "Failed to read stored token");
                }
            }
        }

        log_api_request(&request_id, method.as_str(), path);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log_api_error(&request_id, path, None, &e.to_string());
                return ApiEnvelope::network_failure();
            }
        };

        let status = response.status();
        let body = Self::read_body(response).await;

        if !status.is_success() {
            return self
                .handle_http_failure(status, body, &request_id, path)
                .await;
        }

        normalize_body(body).decode()
    }

    async fn handle_http_failure<T>(
        &self,
        status: StatusCode,
        body: Value,
        request_id: &str,
        path: &str,
    ) -> ApiEnvelope<T> {
        let message = body
            .as_object()
            .and_then(|obj| obj.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        log_api_error(request_id, path, Some(status.as_u16()), &message);

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.storage.clear_token().await {
                warn!(error = %e, "Failed to clear token after 401");
            }
            debug!("Stored token cleared after 401");
            let _ = self.auth_events.send(AuthEvent::Unauthorized);
        }

        ApiEnvelope::http_failure(message, status.as_u16())
    }

    async fn read_body(response: reqwest::Response) -> Value {
        let text = response.text().await.unwrap_or_default();
        if text.is_empty() {
            return Value::Null;
        }
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

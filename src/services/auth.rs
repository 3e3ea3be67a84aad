//! Authentication and profile service
//!
//! Wraps the auth endpoints and keeps the session container in sync
//! with their results. Login and register are the only calls issued
//! without a bearer token.

use std::sync::Arc;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiEnvelope, AuthMode};
use crate::models::{
    AuthData, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
    UserPatch,
};
use crate::state::session::SessionStore;
use crate::utils::helpers::is_valid_email;

/// Authentication service
#[derive(Debug, Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Log in with email and password. On success the received token is
    /// persisted and the session container flips to authenticated.
    pub async fn login(&self, email: &str, password: &str) -> ApiEnvelope<AuthData> {
        if !is_valid_email(email) {
            return ApiEnvelope::validation_failure("A valid email is required");
        }
        if password.is_empty() {
            return ApiEnvelope::validation_failure("Password is required");
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let envelope: ApiEnvelope<AuthData> = self
            .api
            .post_json("auth/login", &request, AuthMode::Skip)
            .await;

        if let Some(data) = &envelope.data {
            if envelope.is_success() {
                let mut user = data.user.clone();
                user.token = Some(data.token.clone());

                if !self.session.login(user).await {
                    warn!("Login succeeded but the session could not be persisted");
                }
                info!(user_id = %data.user.id, "Login completed");
            }
        }

        envelope
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> ApiEnvelope<User> {
        if request.name.trim().is_empty() {
            return ApiEnvelope::validation_failure("Name is required");
        }
        if !is_valid_email(&request.email) {
            return ApiEnvelope::validation_failure("A valid email is required");
        }
        if request.password.len() < 6 {
            return ApiEnvelope::validation_failure("Password must be at least 6 characters");
        }

        self.api
            .post_json("auth/register", request, AuthMode::Skip)
            .await
    }

    /// Log out locally: clears the persisted session and token. The
    /// backend holds no session state to invalidate.
    pub async fn logout(&self) -> ApiEnvelope<()> {
        self.session.logout().await;
        ApiEnvelope::success("Logged out successfully", None)
    }

    /// Fetch a user record
    pub async fn get_user(&self, user_id: &str) -> ApiEnvelope<User> {
        self.api.get(&format!("users/{}", user_id), &[]).await
    }

    /// Update the profile and merge the accepted fields into the session
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: &UpdateProfileRequest,
    ) -> ApiEnvelope<User> {
        let envelope: ApiEnvelope<User> = self
            .api
            .put_json(&format!("users/{}/profile", user_id), request)
            .await;

        if envelope.is_success() {
            let applied = self
                .session
                .update_user(UserPatch {
                    name: request.name.clone(),
                    email: request.email.clone(),
                    ..Default::default()
                })
                .await;
            if !applied {
                warn!("Profile updated but no active session to merge into");
            }
        }

        envelope
    }

    /// Change the account password
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> ApiEnvelope<Value> {
        if current_password.is_empty() || new_password.is_empty() {
            return ApiEnvelope::validation_failure("Both passwords are required");
        }
        if new_password.len() < 6 {
            return ApiEnvelope::validation_failure("New password must be at least 6 characters");
        }

        let request = ChangePasswordRequest {
            current_password: current_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.api
            .put_json(&format!("users/{}/password", user_id), &request)
            .await
    }
}

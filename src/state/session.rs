//! Session state container
//!
//! Process-wide source of truth for the authenticated user. The
//! navigation root consults `is_authenticated` to pick a screen stack;
//! until `hydrate` completes, `loading` stays true and the UI is
//! expected to show a neutral splash state instead of guessing.
//!
//! Every mutating method persists before touching in-memory state, so
//! `is_authenticated` and "a persisted user record exists" never diverge
//! past a single store operation.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use crate::models::{User, UserPatch};
use crate::state::storage::SessionStorage;
use crate::utils::logging::log_session_event;

/// Point-in-time view of the session
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
}

#[derive(Debug)]
struct SessionState {
    user: Option<User>,
    is_authenticated: bool,
    loading: bool,
}

/// Session/auth state container backed by [`SessionStorage`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<SessionStorage>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Create a store in the pre-hydration state
    pub fn new(storage: Arc<SessionStorage>) -> Self {
        Self {
            storage,
            state: Arc::new(RwLock::new(SessionState {
                user: None,
                is_authenticated: false,
                loading: true,
            })),
        }
    }

    /// Load the persisted user, if any. Runs once at startup, before the
    /// navigation root renders. Storage failures leave the session
    /// unauthenticated rather than failing startup.
    pub async fn hydrate(&self) {
        let user = match self.storage.load_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Session hydration failed");
                None
            }
        };

        let mut state = self.state.write().await;
        state.is_authenticated = user.is_some();
        state.user = user;
        state.loading = false;

        log_session_event(
            "hydrated",
            state.user.as_ref().map(|u| u.id.as_str()),
        );
    }

    /// Persist the user and mark the session authenticated. Returns
    /// false when persistence fails; in-memory state is then untouched.
    pub async fn login(&self, user: User) -> bool {
        if let Err(e) = self.storage.save_user(&user).await {
            warn!(error = %e, "Failed to persist user on login");
            return false;
        }
        if let Some(token) = &user.token {
            if let Err(e) = self.storage.save_token(token).await {
                warn!(error = %e, "Failed to persist token on login");
            }
        }

        let mut state = self.state.write().await;
        log_session_event("login", Some(user.id.as_str()));
        state.user = Some(user);
        state.is_authenticated = true;
        state.loading = false;
        true
    }

    /// Clear persisted session data and mark the session unauthenticated
    pub async fn logout(&self) {
        if let Err(e) = self.storage.clear_user().await {
            warn!(error = %e, "Failed to clear persisted user on logout");
        }
        if let Err(e) = self.storage.clear_token().await {
            warn!(error = %e, "Failed to clear persisted token on logout");
        }

        let mut state = self.state.write().await;
        log_session_event("logout", state.user.as_ref().map(|u| u.id.as_str()));
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    }

    /// Merge a partial update into the current user and re-persist.
    /// No-ops (returning false) when no user is loaded.
    pub async fn update_user(&self, patch: UserPatch) -> bool {
        let merged = {
            let state = self.state.read().await;
            match &state.user {
                Some(user) => {
                    let mut merged = user.clone();
                    if let Some(name) = patch.name {
                        merged.name = Some(name);
                    }
                    if let Some(email) = patch.email {
                        merged.email = Some(email);
                    }
                    if let Some(token) = patch.token {
                        merged.token = Some(token);
                    }
                    if let Some(role) = patch.role {
                        merged.role = role;
                    }
                    merged
                }
                None => {
                    debug!("update_user called with no active session");
                    return false;
                }
            }
        };

        if let Err(e) = self.storage.save_user(&merged).await {
            warn!(error = %e, "Failed to persist user update");
            return false;
        }

        let mut state = self.state.write().await;
        state.user = Some(merged);
        true
    }

    /// Current snapshot of the session state
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            user: state.user.clone(),
            is_authenticated: state.is_authenticated,
            loading: state.loading,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// The storage layer shared with the API client
    pub fn storage(&self) -> Arc<SessionStorage> {
        self.storage.clone()
    }
}

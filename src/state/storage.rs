//! Session persistence
//!
//! This module handles persistence of the auth token and user record to
//! local storage, the on-device storage analogue of the mobile client.
//! Two fixed keys exist: the bearer token and the serialized user JSON.
//! Nothing else is persisted by this crate.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use crate::config::StorageConfig;
use crate::models::User;
use crate::utils::errors::Result;

/// Fixed storage key for the bearer token
pub const TOKEN_KEY: &str = "token";
/// Fixed storage key for the serialized user record
pub const USER_KEY: &str = "user_data.json";

/// File-backed storage for the session's token and user record.
///
/// The session container is the sole writer of the user record; the API
/// client additionally clears the token on a 401. Both go through this
/// type so there is exactly one storage layer.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Create a storage handle rooted at the configured directory
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
        }
    }

    /// Storage handle rooted at an explicit path (used by tests)
    pub fn at_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load the persisted bearer token, if any
    pub async fn load_token(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(TOKEN_KEY)).await {
            Ok(raw) => {
                let token = raw.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist the bearer token
    pub async fn save_token(&self, token: &str) -> Result<()> {
        self.ensure_dir().await?;
        fs::write(self.key_path(TOKEN_KEY), token).await?;
        debug!("Token persisted");
        Ok(())
    }

    /// Remove the persisted bearer token. Removing an absent token is
    /// not an error.
    pub async fn clear_token(&self) -> Result<()> {
        match fs::remove_file(self.key_path(TOKEN_KEY)).await {
            Ok(()) => {
                debug!("Token removed from storage");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the persisted user record. A corrupted record is removed and
    /// treated as absent rather than failing hydration.
    pub async fn load_user(&self) -> Result<Option<User>> {
        let path = self.key_path(USER_KEY);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Persisted user record is corrupted, removing");
                let _ = fs::remove_file(&path).await;
                Ok(None)
            }
        }
    }

    /// Persist the user record
    pub async fn save_user(&self, user: &User) -> Result<()> {
        self.ensure_dir().await?;
        let serialized = serde_json::to_string(user)?;
        fs::write(self.key_path(USER_KEY), serialized).await?;
        debug!(user_id = %user.id, "User record persisted");
        Ok(())
    }

    /// Remove the persisted user record
    pub async fn clear_user(&self) -> Result<()> {
        match fs::remove_file(self.key_path(USER_KEY)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a user record is currently persisted
    pub async fn user_exists(&self) -> bool {
        fs::metadata(self.key_path(USER_KEY)).await.is_ok()
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

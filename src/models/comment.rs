//! Comment model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Author block attached to a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A comment under a news article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub user: CommentAuthor,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub is_own_comment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Deletion is offered only for the caller's own comment. This is a
    /// client-side check; the backend stays the authority.
    pub fn can_delete(&self, user_id: &str) -> bool {
        self.is_own_comment || self.user.id == user_id
    }
}

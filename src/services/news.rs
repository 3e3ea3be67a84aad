//! News service
//!
//! Public feed queries, reporter uploads, admin review and engagement
//! actions. Review decisions go through the workflow state machine
//! before any network call; on a success envelope the local list is
//! updated in place instead of re-fetching the whole collection.

use std::sync::Arc;
use async_stream::stream;
use futures::Stream;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{ApiClient, ApiEnvelope, AuthMode};
use crate::config::FeaturesConfig;
use crate::models::{
    Comment, NewsArticle, NewsFilters, NewsPage, NewsStatus, UploadNewsRequest,
};
use crate::state::workflow::{commit_transition, prepare_news_rejection, prepare_transition};

/// Outcome of an admin review
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewDecision {
    Verify,
    Reject { reason: String },
}

/// News service
#[derive(Debug, Clone)]
pub struct NewsService {
    api: Arc<ApiClient>,
    features: FeaturesConfig,
}

impl NewsService {
    /// Create a new NewsService instance
    pub fn new(api: Arc<ApiClient>, features: FeaturesConfig) -> Self {
        Self { api, features }
    }

    /// One page of the published public feed
    pub async fn published_feed(
        &self,
        page: u32,
        limit: u32,
        filters: &NewsFilters,
    ) -> ApiEnvelope<NewsPage> {
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        query.extend(filters.to_query());

        debug!(page = page, district = ?filters.district, "Fetching published feed");
        self.api.get("public/news", &query).await
    }

    /// The published feed as a stream of pages. Stops after the first
    /// failure envelope or the first short page.
    pub fn feed_pages(
        &self,
        filters: NewsFilters,
        limit: u32,
    ) -> impl Stream<Item = ApiEnvelope<NewsPage>> + '_ {
        stream! {
            let mut page = 1u32;
            loop {
                let envelope = self.published_feed(page, limit, &filters).await;
                let done = envelope.error
                    || envelope
                        .data
                        .as_ref()
                        .map(|p| p.articles.len() < limit as usize)
                        .unwrap_or(true);
                yield envelope;
                if done {
                    break;
                }
                page += 1;
            }
        }
    }

    /// A single published article
    pub async fn article(&self, news_id: &str) -> ApiEnvelope<NewsArticle> {
        self.api.get(&format!("public/news/{}", news_id), &[]).await
    }

    /// Full-text search over published news
    pub async fn search(&self, query: &str, page: u32, limit: u32) -> ApiEnvelope<NewsPage> {
        if query.trim().is_empty() {
            return ApiEnvelope::validation_failure("A search query is required");
        }
        let params = vec![
            ("q".to_string(), query.to_string()),
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        self.api.get("public/news/search", &params).await
    }

    /// Trending articles
    pub async fn trending(&self, limit: u32) -> ApiEnvelope<Vec<NewsArticle>> {
        let params = vec![("limit".to_string(), limit.to_string())];
        self.api.get("public/news/trending", &params).await
    }

    /// Admin listing, optionally filtered by status
    pub async fn admin_list(
        &self,
        user_id: &str,
        filters: &NewsFilters,
    ) -> ApiEnvelope<Vec<NewsArticle>> {
        if !self.features.admin_panel {
            return ApiEnvelope::validation_failure("Admin panel is disabled");
        }
        let mut query = vec![("userId".to_string(), user_id.to_string())];
        query.extend(filters.to_query());
        self.api.get("admin/news", &query).await
    }

    /// Upload a new article as multipart form data
    pub async fn upload(
        &self,
        user_id: &str,
        request: UploadNewsRequest,
    ) -> ApiEnvelope<NewsArticle> {
        if request.headline.trim().is_empty() {
            return ApiEnvelope::validation_failure("A headline is required");
        }
        if request.description.trim().is_empty() {
            return ApiEnvelope::validation_failure("A description is required");
        }
        if request.category.trim().is_empty() {
            return ApiEnvelope::validation_failure("A category is required");
        }

        let form = match Self::build_upload_form(&request) {
            Ok(form) => form,
            Err(message) => return ApiEnvelope::validation_failure(message),
        };

        self.api
            .post_multipart(&format!("admin/news/upload/{}", user_id), form)
            .await
    }

    fn build_upload_form(
        request: &UploadNewsRequest,
    ) -> std::result::Result<reqwest::multipart::Form, String> {
        let location = serde_json::to_string(&request.location)
            .map_err(|e| format!("Invalid location payload: {}", e))?;
        let reporter = serde_json::to_string(&request.reporter)
            .map_err(|e| format!("Invalid reporter payload: {}", e))?;

        let mut form = reqwest::multipart::Form::new()
            .text("headline", request.headline.clone())
            .text("description", request.description.clone())
            .text("category", request.category.clone())
            .text("newsType", request.news_type.clone())
            .text("tags", request.tags.clone())
            .text("source", request.source.clone())
            .text("isBreakingNews", request.is_breaking_news.to_string())
            .text("isLiveNews", request.is_live_news.to_string())
            .text("location", location)
            .text("reporterDetails", reporter);

        if let Some(live_stream_url) = &request.live_stream_url {
            form = form.text("liveStreamUrl", live_stream_url.clone());
        }

        for media in &request.media {
            let part = reqwest::multipart::Part::bytes(media.bytes.clone())
                .file_name(media.file_name.clone())
                .mime_str(&media.mime_type)
                .map_err(|e| format!("Invalid media type '{}': {}", media.mime_type, e))?;
            form = form.part(media.field.as_str(), part);
        }

        Ok(form)
    }

    /// Apply an admin review decision.
    ///
    /// The transition is validated against `list` first; a rejection
    /// without a reason or an illegal transition never reaches the
    /// network. On a success envelope the matching entry's status is
    /// replaced in place.
    pub async fn review(
        &self,
        list: &mut [NewsArticle],
        news_id: &str,
        decision: ReviewDecision,
    ) -> ApiEnvelope<Value> {
        if !self.features.admin_panel {
            return ApiEnvelope::validation_failure("Admin panel is disabled");
        }

        let (transition, body) = match &decision {
            ReviewDecision::Verify => {
                match prepare_transition(list, news_id, NewsStatus::Verified) {
                    Ok(transition) => (transition, json!({ "status": "verified" })),
                    Err(e) => return ApiEnvelope::validation_failure(e.to_string()),
                }
            }
            ReviewDecision::Reject { reason } => {
                match prepare_news_rejection(list, news_id, reason) {
                    Ok(transition) => (
                        transition,
                        json!({ "status": "rejected", "rejectionReason": reason }),
                    ),
                    Err(e) => return ApiEnvelope::validation_failure(e.to_string()),
                }
            }
        };

        let envelope: ApiEnvelope<Value> = self
            .api
            .put_json(&format!("admin/news/{}/status", news_id), &body)
            .await;

        if envelope.is_success() {
            commit_transition(list, &transition);
        }

        envelope
    }

    /// Comments under an article
    pub async fn comments(&self, news_id: &str) -> ApiEnvelope<Vec<Comment>> {
        if !self.features.engagement {
            return ApiEnvelope::validation_failure("Engagement is disabled");
        }
        self.api
            .get(&format!("news/{}/comments", news_id), &[])
            .await
    }

    /// Add a comment under an article
    pub async fn add_comment(&self, news_id: &str, text: &str) -> ApiEnvelope<Comment> {
        if !self.features.engagement {
            return ApiEnvelope::validation_failure("Engagement is disabled");
        }
        if text.trim().is_empty() {
            return ApiEnvelope::validation_failure("Comment text is required");
        }
        self.api
            .post_json(
                &format!("news/{}/comments", news_id),
                &json!({ "comment": text }),
                AuthMode::Bearer,
            )
            .await
    }

    /// Delete a comment. Only the comment's own author may delete it;
    /// the check runs client-side before the call, the backend stays
    /// the authority.
    pub async fn delete_comment(
        &self,
        news_id: &str,
        comment: &Comment,
        user_id: &str,
    ) -> ApiEnvelope<Value> {
        if !self.features.engagement {
            return ApiEnvelope::validation_failure("Engagement is disabled");
        }
        if !comment.can_delete(user_id) {
            return ApiEnvelope::validation_failure("You can only delete your own comments");
        }
        self.api
            .delete(&format!("news/{}/comments/{}", news_id, comment.id))
            .await
    }

    /// Toggle a like on an article
    pub async fn toggle_like(&self, news_id: &str) -> ApiEnvelope<Value> {
        self.engagement_toggle(news_id, "like").await
    }

    /// Record a share of an article
    pub async fn share(&self, news_id: &str) -> ApiEnvelope<Value> {
        self.engagement_toggle(news_id, "share").await
    }

    /// Toggle a bookmark on an article
    pub async fn toggle_bookmark(&self, news_id: &str) -> ApiEnvelope<Value> {
        self.engagement_toggle(news_id, "save").await
    }

    async fn engagement_toggle(&self, news_id: &str, action: &str) -> ApiEnvelope<Value> {
        if !self.features.engagement {
            return ApiEnvelope::validation_failure("Engagement is disabled");
        }
        self.api
            .post_empty(&format!("news/{}/{}", news_id, action))
            .await
    }
}

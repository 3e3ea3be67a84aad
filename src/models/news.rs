//! News article model and feed query types

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Review status of an article. Transitions are owned by
/// `state::workflow`; this type only names the states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    Pending,
    Verified,
    Rejected,
}

impl std::fmt::Display for NewsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NewsStatus::Pending => write!(f, "pending"),
            NewsStatus::Verified => write!(f, "verified"),
            NewsStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Denormalized reporter details attached to an article by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReporterDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Location block attached to an article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

/// Engagement counters maintained by the backend
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngagementCounts {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub comments: u64,
}

/// A news article as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    #[serde(alias = "title")]
    pub headline: String,
    #[serde(default, alias = "content")]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reporter: ReporterDetails,
    #[serde(default)]
    pub location: NewsLocation,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub is_breaking_news: bool,
    #[serde(default)]
    pub is_live_news: bool,
    pub status: NewsStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub counts: EngagementCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewsArticle {
    /// Rejection reason with the fallback copy the rejected-news list shows
    pub fn rejection_reason_or_default(&self) -> &str {
        match self.rejection_reason.as_deref() {
            Some(reason) if !reason.is_empty() => reason,
            _ => "News doesn't contain detailed information clarity is low",
        }
    }
}

/// Query filters for the published feed and admin listings
#[derive(Debug, Clone, Default)]
pub struct NewsFilters {
    pub district: Option<String>,
    pub category: Option<String>,
    pub news_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<NewsStatus>,
}

impl NewsFilters {
    /// Flatten into query pairs; unset filters are simply absent
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(district) = &self.district {
            pairs.push(("district".to_string(), district.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(news_type) = &self.news_type {
            pairs.push(("newsType".to_string(), news_type.clone()));
        }
        if let Some(priority) = &self.priority {
            pairs.push(("priority".to_string(), priority.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        pairs
    }
}

/// One page of the published feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    #[serde(default, alias = "news", alias = "items")]
    pub articles: Vec<NewsArticle>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Multipart upload payload assembled by the reporter flow
#[derive(Debug, Clone, Default)]
pub struct UploadNewsRequest {
    pub headline: String,
    pub description: String,
    pub category: String,
    pub news_type: String,
    pub tags: String,
    pub source: String,
    pub is_breaking_news: bool,
    pub is_live_news: bool,
    pub live_stream_url: Option<String>,
    pub location: NewsLocation,
    pub reporter: ReporterDetails,
    pub media: Vec<MediaAttachment>,
}

/// A media part attached to an upload
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub field: MediaField,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Which multipart field a media attachment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaField {
    Image,
    Video,
}

impl MediaField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaField::Image => "images",
            MediaField::Video => "videos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&NewsStatus::Pending).unwrap(), r#""pending""#);
        let status: NewsStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(status, NewsStatus::Rejected);
    }

    #[test]
    fn test_article_accepts_title_alias() {
        let json = r#"{"id": "n1", "title": "Flood alert", "status": "pending"}"#;
        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.headline, "Flood alert");
        assert_eq!(article.counts.likes, 0);
    }

    #[test]
    fn test_rejection_reason_fallback() {
        let json = r#"{"id": "n2", "headline": "x", "status": "rejected"}"#;
        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert!(article.rejection_reason_or_default().contains("clarity"));
    }

    #[test]
    fn test_filters_to_query_skips_unset() {
        let filters = NewsFilters {
            district: Some("Guntur".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_query(), vec![("district".to_string(), "Guntur".to_string())]);
        assert!(NewsFilters::default().to_query().is_empty());
    }
}

//! Reporter model

use serde::{Deserialize, Serialize};

/// Account status of a reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReporterStatus {
    Pending,
    Active,
    Suspended,
}

impl std::fmt::Display for ReporterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReporterStatus::Pending => write!(f, "pending"),
            ReporterStatus::Active => write!(f, "active"),
            ReporterStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// A reporter account as returned by the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub status: ReporterStatus,
    #[serde(default)]
    pub articles_count: u64,
    #[serde(default)]
    pub verified_articles: u64,
}

/// Per-status tallies shown on top of the reporter list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReporterCounts {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub suspended: usize,
}

impl ReporterCounts {
    /// Derive the tallies from a fetched reporter list
    pub fn tally(reporters: &[Reporter]) -> Self {
        Self {
            total: reporters.len(),
            active: reporters.iter().filter(|r| r.status == ReporterStatus::Active).count(),
            pending: reporters.iter().filter(|r| r.status == ReporterStatus::Pending).count(),
            suspended: reporters.iter().filter(|r| r.status == ReporterStatus::Suspended).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reporter(id: &str, status: ReporterStatus) -> Reporter {
        Reporter {
            id: id.to_string(),
            name: "Test Reporter".to_string(),
            email: "reporter@varta.news".to_string(),
            phone: None,
            city: None,
            state: None,
            status,
            articles_count: 0,
            verified_articles: 0,
        }
    }

    #[test]
    fn test_tally() {
        let reporters = vec![
            reporter("1", ReporterStatus::Active),
            reporter("2", ReporterStatus::Active),
            reporter("3", ReporterStatus::Pending),
            reporter("4", ReporterStatus::Suspended),
        ];
        let counts = ReporterCounts::tally(&reporters);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.suspended, 1);
    }
}

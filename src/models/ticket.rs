//! Support ticket model

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};

/// Lifecycle status of a support ticket.
///
/// The backend is loose about casing and separators ("RESOLVED",
/// "inprogress"), so deserialization goes through [`TicketStatus::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// Parse the loose status strings the backend emits
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "open" => Some(TicketStatus::Open),
            "in_progress" | "inprogress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// Whether the ticket still counts as open in the tab partitioning
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Open => write!(f, "open"),
            TicketStatus::InProgress => write!(f, "in_progress"),
            TicketStatus::Resolved => write!(f, "resolved"),
            TicketStatus::Closed => write!(f, "closed"),
        }
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TicketStatus::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown ticket status '{}'", raw)))
    }
}

/// A support ticket as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SupportTicket {
    /// Human-facing reference, e.g. `TKT-17`
    pub fn reference(&self) -> String {
        format!("TKT-{}", self.id)
    }
}

/// Validated input for ticket creation
#[derive(Debug, Clone)]
pub struct CreateTicketRequest {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub email: String,
}

/// Partition a ticket list into the open and closed help-screen tabs
pub fn partition_by_tab(tickets: &[SupportTicket]) -> (Vec<&SupportTicket>, Vec<&SupportTicket>) {
    tickets.iter().partition(|t| t.status.is_open())
}

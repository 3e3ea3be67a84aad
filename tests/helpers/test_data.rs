//! Test data builders
//!
//! Builders for the entities the suites work with. Names and emails are
//! generated with `fake` so tests don't share magic strings.

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use serde_json::{json, Value};
use varta_client::models::{NewsArticle, NewsStatus, Reporter, ReporterStatus, Role, SupportTicket, TicketStatus, User};

/// In-memory user with the given role
pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: Some(Name().fake()),
        email: Some(SafeEmail().fake()),
        token: Some(format!("token-{}", id)),
        role,
    }
}

/// JSON user payload as the backend returns it
pub fn user_json(id: &str, role: &str) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({ "id": id, "name": name, "email": email, "role": role })
}

/// Article with the given review status
pub fn article(id: &str, status: NewsStatus) -> NewsArticle {
    serde_json::from_value(json!({
        "id": id,
        "headline": format!("Headline {}", id),
        "description": "Something happened",
        "category": "local",
        "status": status.to_string(),
    }))
    .unwrap()
}

/// Reporter with the given account status
pub fn reporter(id: &str, status: ReporterStatus) -> Reporter {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "email": email,
        "status": status.to_string(),
    }))
    .unwrap()
}

/// Ticket with the given status
pub fn ticket(id: &str, status: TicketStatus) -> SupportTicket {
    let email: String = SafeEmail().fake();
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Issue {}", id),
        "description": "It is broken",
        "email": email,
        "status": status.to_string(),
    }))
    .unwrap()
}

/// JSON article payload as the backend returns it
pub fn article_json(id: &str, headline: &str) -> Value {
    json!({
        "id": id,
        "headline": headline,
        "description": "Something happened",
        "category": "local",
        "status": "verified",
    })
}

//! Support ticket service
//!
//! Ticket creation with client-side field validation, listing, and the
//! admin-only resolve action. The create endpoint takes its fields as
//! URL-encoded query parameters, matching the backend's contract.

use std::sync::Arc;
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiClient, ApiEnvelope};
use crate::models::{CreateTicketRequest, SupportTicket, TicketStatus, User};
use crate::state::workflow::{commit_transition, prepare_transition};
use crate::utils::helpers::is_valid_email;

/// Support ticket service
#[derive(Debug, Clone)]
pub struct TicketService {
    api: Arc<ApiClient>,
}

impl TicketService {
    /// Create a new TicketService instance
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Create a support ticket. Field validation happens here; an
    /// invalid request performs no network call.
    pub async fn create(&self, request: &CreateTicketRequest) -> ApiEnvelope<SupportTicket> {
        if request.title.trim().is_empty() {
            return ApiEnvelope::validation_failure("A ticket title is required");
        }
        if request.description.trim().is_empty() {
            return ApiEnvelope::validation_failure("A ticket description is required");
        }
        if !is_valid_email(&request.email) {
            return ApiEnvelope::validation_failure("A valid contact email is required");
        }

        let path = format!(
            "tickets/create/{}?title={}&description={}&email={}",
            request.user_id,
            urlencoding::encode(&request.title),
            urlencoding::encode(&request.description),
            urlencoding::encode(&request.email),
        );

        debug!(user_id = %request.user_id, "Creating support ticket");
        self.api.post_empty(&path).await
    }

    /// All tickets visible to a user
    pub async fn list(&self, user_id: &str) -> ApiEnvelope<Vec<SupportTicket>> {
        self.api
            .get(&format!("tickets/all/{}", user_id), &[])
            .await
    }

    /// Mark a ticket resolved. Only an admin may do this; a reporter
    /// cannot self-resolve. On success the local list is updated in
    /// place.
    pub async fn resolve(
        &self,
        list: &mut [SupportTicket],
        actor: &User,
        ticket_id: &str,
    ) -> ApiEnvelope<Value> {
        if !actor.is_admin() {
            return ApiEnvelope::validation_failure("Only an admin can resolve tickets");
        }

        let transition = match prepare_transition(list, ticket_id, TicketStatus::Resolved) {
            Ok(transition) => transition,
            Err(e) => return ApiEnvelope::validation_failure(e.to_string()),
        };

        let path = format!(
            "tickets/update/{}/{}?status={}",
            actor.id,
            ticket_id,
            TicketStatus::Resolved
        );

        let envelope: ApiEnvelope<Value> = self.api.put_empty(&path).await;

        if envelope.is_success() {
            commit_transition(list, &transition);
        }

        envelope
    }
}

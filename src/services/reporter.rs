//! Reporter management service
//!
//! Admin listing and the approve/suspend/reactivate actions. Actions
//! are validated against the local list before the call; suspension
//! additionally requires an explicit confirmation from the caller.

use std::sync::Arc;
use serde_json::Value;
use tracing::debug;

use crate::api::{ApiClient, ApiEnvelope};
use crate::config::FeaturesConfig;
use crate::models::{Reporter, ReporterCounts};
use crate::state::workflow::{commit_transition, prepare_transition, ReporterAction};

/// Reporter management service
#[derive(Debug, Clone)]
pub struct ReporterService {
    api: Arc<ApiClient>,
    features: FeaturesConfig,
}

impl ReporterService {
    /// Create a new ReporterService instance
    pub fn new(api: Arc<ApiClient>, features: FeaturesConfig) -> Self {
        Self { api, features }
    }

    /// Full reporter listing for the admin panel
    pub async fn list(&self) -> ApiEnvelope<Vec<Reporter>> {
        if !self.features.admin_panel {
            return ApiEnvelope::validation_failure("Admin panel is disabled");
        }
        self.api.get("admin/reporters", &[]).await
    }

    /// Per-status tallies for a fetched listing
    pub fn counts(reporters: &[Reporter]) -> ReporterCounts {
        ReporterCounts::tally(reporters)
    }

    /// Approve a pending reporter
    pub async fn approve(
        &self,
        list: &mut [Reporter],
        reporter_id: &str,
    ) -> ApiEnvelope<Value> {
        self.apply_action(list, reporter_id, ReporterAction::Approve, false)
            .await
    }

    /// Suspend an active reporter. `confirmed` must be true — the UI
    /// asks before suspending, never before approving.
    pub async fn suspend(
        &self,
        list: &mut [Reporter],
        reporter_id: &str,
        confirmed: bool,
    ) -> ApiEnvelope<Value> {
        self.apply_action(list, reporter_id, ReporterAction::Suspend, confirmed)
            .await
    }

    /// Reactivate a suspended reporter
    pub async fn reactivate(
        &self,
        list: &mut [Reporter],
        reporter_id: &str,
    ) -> ApiEnvelope<Value> {
        self.apply_action(list, reporter_id, ReporterAction::Reactivate, false)
            .await
    }

    async fn apply_action(
        &self,
        list: &mut [Reporter],
        reporter_id: &str,
        action: ReporterAction,
        confirmed: bool,
    ) -> ApiEnvelope<Value> {
        if !self.features.admin_panel {
            return ApiEnvelope::validation_failure("Admin panel is disabled");
        }
        if action.requires_confirmation() && !confirmed {
            return ApiEnvelope::validation_failure(
                "Suspending a reporter requires confirmation",
            );
        }

        let transition = match prepare_transition(list, reporter_id, action.target()) {
            Ok(transition) => transition,
            Err(e) => return ApiEnvelope::validation_failure(e.to_string()),
        };

        debug!(reporter_id = reporter_id, action = ?action, "Applying reporter action");

        let envelope: ApiEnvelope<Value> = self
            .api
            .put_empty(&format!(
                "admin/reporters/{}/{}",
                reporter_id,
                action.path_segment()
            ))
            .await;

        if envelope.is_success() {
            commit_transition(list, &transition);
        }

        envelope
    }
}

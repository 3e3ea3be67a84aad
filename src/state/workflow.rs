//! Entity workflow state machines
//!
//! Legal status transitions for news, reporters and tickets, plus the
//! prepare/commit protocol for applying them to local lists:
//!
//! 1. `prepare_*` validates the transition against the current list and
//!    returns a [`StatusTransition`] without touching anything;
//! 2. the caller issues the mutating API call;
//! 3. on a success envelope, `commit_transition` replaces the matching
//!    entry's status in place — no re-fetch of the full list;
//! 4. on a failure envelope, nothing is committed and the list stays
//!    untouched, so there is nothing to roll back.
//!
//! Illegal transitions and missing required inputs are rejected here,
//! before any network call is made.

use crate::models::{
    NewsArticle, NewsStatus, Reporter, ReporterStatus, SupportTicket, TicketStatus,
};
use crate::utils::errors::{VartaError, Result};
use crate::utils::logging::log_workflow_transition;

/// Status types with a fixed transition table
pub trait StatusMachine: Copy + PartialEq + std::fmt::Display {
    fn can_transition(self, to: Self) -> bool;
}

impl StatusMachine for NewsStatus {
    fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (NewsStatus::Pending, NewsStatus::Verified)
                | (NewsStatus::Pending, NewsStatus::Rejected)
        )
    }
}

impl StatusMachine for ReporterStatus {
    fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (ReporterStatus::Pending, ReporterStatus::Active)
                | (ReporterStatus::Active, ReporterStatus::Suspended)
                | (ReporterStatus::Suspended, ReporterStatus::Active)
        )
    }
}

impl StatusMachine for TicketStatus {
    fn can_transition(self, to: Self) -> bool {
        match (self, to) {
            (TicketStatus::Open, TicketStatus::InProgress) => true,
            // Anything still un-resolved may be marked resolved; nothing
            // ever returns to open.
            (from, TicketStatus::Resolved) => from != TicketStatus::Resolved,
            _ => false,
        }
    }
}

/// Entities carrying a workflow status in a local list
pub trait StatusEntity {
    type Status: StatusMachine;

    fn id(&self) -> &str;
    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);
    fn entity_name() -> &'static str;
}

impl StatusEntity for NewsArticle {
    type Status = NewsStatus;

    fn id(&self) -> &str {
        &self.id
    }
    fn status(&self) -> NewsStatus {
        self.status
    }
    fn set_status(&mut self, status: NewsStatus) {
        self.status = status;
    }
    fn entity_name() -> &'static str {
        "news"
    }
}

impl StatusEntity for Reporter {
    type Status = ReporterStatus;

    fn id(&self) -> &str {
        &self.id
    }
    fn status(&self) -> ReporterStatus {
        self.status
    }
    fn set_status(&mut self, status: ReporterStatus) {
        self.status = status;
    }
    fn entity_name() -> &'static str {
        "reporter"
    }
}

impl StatusEntity for SupportTicket {
    type Status = TicketStatus;

    fn id(&self) -> &str {
        &self.id
    }
    fn status(&self) -> TicketStatus {
        self.status
    }
    fn set_status(&mut self, status: TicketStatus) {
        self.status = status;
    }
    fn entity_name() -> &'static str {
        "ticket"
    }
}

/// A validated, not-yet-applied status change
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTransition<S> {
    pub entity_id: String,
    pub from: S,
    pub to: S,
}

/// Validate a transition against the entity's current status in `list`
pub fn prepare_transition<E: StatusEntity>(
    list: &[E],
    entity_id: &str,
    to: E::Status,
) -> Result<StatusTransition<E::Status>> {
    let entity = list
        .iter()
        .find(|e| e.id() == entity_id)
        .ok_or_else(|| {
            VartaError::InvalidInput(format!("Unknown {} id: {}", E::entity_name(), entity_id))
        })?;

    let from = entity.status();
    if !from.can_transition(to) {
        return Err(VartaError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok(StatusTransition {
        entity_id: entity_id.to_string(),
        from,
        to,
    })
}

/// Validate a news rejection: a non-empty reason is required before any
/// network call is issued.
pub fn prepare_news_rejection(
    list: &[NewsArticle],
    news_id: &str,
    rejection_reason: &str,
) -> Result<StatusTransition<NewsStatus>> {
    if rejection_reason.trim().is_empty() {
        return Err(VartaError::InvalidInput(
            "A rejection reason is required".to_string(),
        ));
    }
    prepare_transition(list, news_id, NewsStatus::Rejected)
}

/// Apply a prepared transition to the local list after the server has
/// acknowledged it. Returns whether a matching entry was updated.
pub fn commit_transition<E: StatusEntity>(
    list: &mut [E],
    transition: &StatusTransition<E::Status>,
) -> bool {
    let mut applied = false;
    for entity in list.iter_mut() {
        if entity.id() == transition.entity_id {
            entity.set_status(transition.to);
            applied = true;
        }
    }

    if applied {
        log_workflow_transition(
            E::entity_name(),
            &transition.entity_id,
            &transition.from.to_string(),
            &transition.to.to_string(),
        );
    }
    applied
}

/// Admin actions on a reporter account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReporterAction {
    Approve,
    Suspend,
    Reactivate,
}

impl ReporterAction {
    /// Status the action moves the reporter to
    pub fn target(self) -> ReporterStatus {
        match self {
            ReporterAction::Approve => ReporterStatus::Active,
            ReporterAction::Suspend => ReporterStatus::Suspended,
            ReporterAction::Reactivate => ReporterStatus::Active,
        }
    }

    /// Status the action is valid from
    pub fn expected_from(self) -> ReporterStatus {
        match self {
            ReporterAction::Approve => ReporterStatus::Pending,
            ReporterAction::Suspend => ReporterStatus::Active,
            ReporterAction::Reactivate => ReporterStatus::Suspended,
        }
    }

    /// Suspension asks for explicit confirmation before the call is
    /// issued; approval and reactivation do not.
    pub fn requires_confirmation(self) -> bool {
        matches!(self, ReporterAction::Suspend)
    }

    /// Backend path segment for the action
    pub fn path_segment(self) -> &'static str {
        match self {
            ReporterAction::Approve => "approve",
            ReporterAction::Suspend => "suspend",
            ReporterAction::Reactivate => "reactivate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    fn article(id: &str, status: NewsStatus) -> NewsArticle {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "headline": "Headline",
            "status": status.to_string(),
        }))
        .unwrap()
    }

    fn reporter(id: &str, status: ReporterStatus) -> Reporter {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "R",
            "email": "r@varta.news",
            "status": status.to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn test_news_transitions() {
        assert!(NewsStatus::Pending.can_transition(NewsStatus::Verified));
        assert!(NewsStatus::Pending.can_transition(NewsStatus::Rejected));
        assert!(!NewsStatus::Verified.can_transition(NewsStatus::Rejected));
        assert!(!NewsStatus::Rejected.can_transition(NewsStatus::Pending));
    }

    #[test]
    fn test_reporter_transitions() {
        assert!(ReporterStatus::Pending.can_transition(ReporterStatus::Active));
        assert!(ReporterStatus::Active.can_transition(ReporterStatus::Suspended));
        assert!(ReporterStatus::Suspended.can_transition(ReporterStatus::Active));
        assert!(!ReporterStatus::Pending.can_transition(ReporterStatus::Suspended));
        assert!(!ReporterStatus::Suspended.can_transition(ReporterStatus::Pending));
    }

    #[test]
    fn test_ticket_transitions() {
        assert!(TicketStatus::Open.can_transition(TicketStatus::InProgress));
        assert!(TicketStatus::Open.can_transition(TicketStatus::Resolved));
        assert!(TicketStatus::InProgress.can_transition(TicketStatus::Resolved));
        assert!(TicketStatus::Closed.can_transition(TicketStatus::Resolved));
        assert!(!TicketStatus::Resolved.can_transition(TicketStatus::Open));
        assert!(!TicketStatus::Resolved.can_transition(TicketStatus::Resolved));
    }

    #[test]
    fn test_prepare_and_commit() {
        let mut list = vec![
            article("n1", NewsStatus::Pending),
            article("n2", NewsStatus::Pending),
        ];

        let transition = prepare_transition(&list, "n1", NewsStatus::Verified).unwrap();
        assert_eq!(transition.from, NewsStatus::Pending);

        assert!(commit_transition(&mut list, &transition));
        assert_eq!(list[0].status, NewsStatus::Verified);
        // The other entry is untouched
        assert_eq!(list[1].status, NewsStatus::Pending);
    }

    #[test]
    fn test_prepare_rejects_illegal_transition() {
        let list = vec![reporter("r1", ReporterStatus::Pending)];
        let err = prepare_transition(&list, "r1", ReporterStatus::Suspended).unwrap_err();
        assert_matches!(err, VartaError::InvalidStateTransition { .. });
    }

    #[test]
    fn test_prepare_rejects_unknown_id() {
        let list = vec![article("n1", NewsStatus::Pending)];
        let err = prepare_transition(&list, "missing", NewsStatus::Verified).unwrap_err();
        assert_matches!(err, VartaError::InvalidInput(_));
    }

    #[test]
    fn test_rejection_requires_reason() {
        let list = vec![article("n1", NewsStatus::Pending)];
        assert_matches!(
            prepare_news_rejection(&list, "n1", "   "),
            Err(VartaError::InvalidInput(_))
        );
        assert!(prepare_news_rejection(&list, "n1", "blurred photos").is_ok());
    }

    #[test]
    fn test_reporter_actions() {
        assert_eq!(ReporterAction::Approve.target(), ReporterStatus::Active);
        assert_eq!(ReporterAction::Suspend.expected_from(), ReporterStatus::Active);
        assert!(ReporterAction::Suspend.requires_confirmation());
        assert!(!ReporterAction::Approve.requires_confirmation());
        assert!(!ReporterAction::Reactivate.requires_confirmation());
    }

    proptest! {
        // Every reporter action's expected_from -> target pair is legal,
        // and committing never touches other entries.
        #[test]
        fn prop_reporter_actions_are_legal(index in 0usize..3) {
            let action = [ReporterAction::Approve, ReporterAction::Suspend, ReporterAction::Reactivate][index];
            prop_assert!(action.expected_from().can_transition(action.target()));
        }

        #[test]
        fn prop_commit_only_touches_matching_id(n in 1usize..10, target in 0usize..10) {
            let mut list: Vec<Reporter> = (0..n)
                .map(|i| reporter(&format!("r{}", i), ReporterStatus::Pending))
                .collect();
            let id = format!("r{}", target % n);
            let transition = prepare_transition(&list, &id, ReporterStatus::Active).unwrap();
            commit_transition(&mut list, &transition);

            for entity in &list {
                if entity.id == id {
                    prop_assert_eq!(entity.status, ReporterStatus::Active);
                } else {
                    prop_assert_eq!(entity.status, ReporterStatus::Pending);
                }
            }
        }
    }
}

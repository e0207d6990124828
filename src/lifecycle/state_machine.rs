use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Collaboration, CollaborationStatus, StatusChange};

use CollaborationStatus::*;

/// Allowed next states from a given status. Terminal states return an empty
/// slice. CANCELLED is reachable from every non-terminal state.
pub fn allowed_transitions(current: CollaborationStatus) -> &'static [CollaborationStatus] {
    match current {
        Requested => &[Accepted, Cancelled],
        Accepted => &[InDiscussion, Cancelled],
        InDiscussion => &[Agreed, Cancelled],
        Agreed => &[InProgress, Cancelled],
        InProgress => &[Completed, Cancelled],
        Completed | Cancelled => &[],
    }
}

pub fn is_terminal(status: CollaborationStatus) -> bool {
    allowed_transitions(status).is_empty()
}

/// States in which deliverables and milestones may still be edited.
pub fn is_editable(status: CollaborationStatus) -> bool {
    matches!(status, Accepted | InDiscussion | Agreed | InProgress)
}

/// Recoverable, user-facing transition failures. Both variants carry enough
/// context to tell the caller what would have been allowed.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("cannot transition from terminal state {current}")]
    Terminal { current: CollaborationStatus },

    #[error("invalid transition {current} -> {target}; allowed: {}", format_allowed(.allowed))]
    NotAllowed {
        current: CollaborationStatus,
        target: CollaborationStatus,
        allowed: Vec<CollaborationStatus>,
    },
}

impl TransitionError {
    /// The transitions that would have been accepted from the current state.
    pub fn allowed(&self) -> &[CollaborationStatus] {
        match self {
            TransitionError::Terminal { .. } => &[],
            TransitionError::NotAllowed { allowed, .. } => allowed,
        }
    }
}

fn format_allowed(allowed: &[CollaborationStatus]) -> String {
    allowed
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate a single lifecycle transition.
pub fn validate_transition(
    current: CollaborationStatus,
    target: CollaborationStatus,
) -> Result<(), TransitionError> {
    if is_terminal(current) {
        return Err(TransitionError::Terminal { current });
    }

    let allowed = allowed_transitions(current);
    if allowed.contains(&target) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed {
            current,
            target,
            allowed: allowed.to_vec(),
        })
    }
}

/// Validate and apply a transition, returning the updated collaboration with
/// one record appended to its history. The input history is never mutated;
/// the new value is old history + [entry].
pub fn apply_transition(
    collaboration: &Collaboration,
    target: CollaborationStatus,
    actor_id: &str,
    at: DateTime<Utc>,
) -> Result<Collaboration, TransitionError> {
    validate_transition(collaboration.status, target)?;

    let mut updated = collaboration.clone();
    let mut history = collaboration.status_history.clone();
    history.push(StatusChange {
        from: collaboration.status,
        to: target,
        at,
        actor_id: actor_id.to_string(),
    });

    updated.status = target;
    updated.status_history = history;
    if target == Completed || target == Cancelled {
        updated.end_date = Some(at);
    }

    Ok(updated)
}

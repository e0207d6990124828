//! Collaboration lifecycle orchestration: transition validation, persistence
//! with optimistic concurrency, and the reliability feedback loop.

pub mod reliability;
pub mod state_machine;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Collaboration, CollaborationStatus, Feedback, Milestone, PartyRole};
use crate::services::notify::{NotificationKind, Notifier};
use crate::services::store::{CollaborationPatch, MatchStore, StoreError};

use reliability::{milestone_crossed, ReliabilityEvent};
use state_machine::{apply_transition, is_editable, TransitionError};

pub use state_machine::{allowed_transitions, is_terminal, validate_transition};

/// Retries for a conditional write that loses the optimistic-concurrency
/// race. Each retry reloads and revalidates against the fresh row, so a
/// racing duplicate request fails validation instead of double-appending
/// history, and a harmless concurrent version bump is absorbed.
const UPDATE_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("collaboration not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Invalid(#[from] TransitionError),

    #[error("concurrent updates exhausted retries for collaboration {0}")]
    Contention(Uuid),

    #[error("collaboration {id} is not editable in state {status}")]
    NotEditable { id: Uuid, status: CollaborationStatus },

    #[error(transparent)]
    Store(StoreError),
}

fn map_store_err(id: Uuid, err: StoreError) -> LifecycleError {
    match err {
        StoreError::NotFound(_) => LifecycleError::NotFound(id),
        other => LifecycleError::Store(other),
    }
}

/// Execute a lifecycle transition as a single logical unit: validate, persist
/// the new status plus history entry, then apply reliability effects.
///
/// The persisted transition is the user-visible source of truth. Reliability
/// and notification failures after the commit are logged and swallowed; they
/// never roll the transition back.
pub async fn transition(
    store: &dyn MatchStore,
    notifier: &dyn Notifier,
    id: Uuid,
    target: CollaborationStatus,
    actor_id: &str,
) -> Result<Collaboration, LifecycleError> {
    let mut last_conflict = None;

    for _ in 0..UPDATE_ATTEMPTS {
        let current = store
            .get_collaboration(id)
            .await
            .map_err(|e| map_store_err(id, e))?;

        let updated = apply_transition(&current, target, actor_id, Utc::now())?;

        let patch = CollaborationPatch {
            status: Some(updated.status),
            status_history: Some(updated.status_history.clone()),
            start_date: (target == CollaborationStatus::InProgress).then(Utc::now),
            end_date: updated.end_date,
            expected_version: current.version,
            ..Default::default()
        };

        match store.update_collaboration(id, patch).await {
            Ok(persisted) => {
                tracing::info!(
                    "Collaboration {} transitioned {} -> {} by {}",
                    id,
                    current.status,
                    target,
                    actor_id
                );
                notify_counterparty(notifier, &persisted, target, actor_id).await;
                settle_reliability(store, notifier, &persisted, target).await;
                return Ok(persisted);
            }
            Err(StoreError::VersionConflict { .. }) => {
                // Another writer won the race; reload and revalidate.
                last_conflict = Some(());
                continue;
            }
            Err(e) => return Err(map_store_err(id, e)),
        }
    }

    debug_assert!(last_conflict.is_some());
    Err(LifecycleError::Contention(id))
}

/// Tell the party who did not initiate the change about the new status.
/// Fire-and-forget like all notifications.
async fn notify_counterparty(
    notifier: &dyn Notifier,
    collaboration: &Collaboration,
    target: CollaborationStatus,
    actor_id: &str,
) {
    let recipient = if actor_id == collaboration.seller_id {
        &collaboration.creator_id
    } else {
        &collaboration.seller_id
    };

    notifier
        .notify(
            recipient,
            NotificationKind::CollaborationUpdate,
            serde_json::json!({
                "collaborationId": collaboration.id,
                "status": target.to_string(),
            }),
        )
        .await;
}

/// Apply the terminal-outcome reliability deltas to both parties. Completion
/// rewards both sides; cancellation penalizes both symmetrically regardless
/// of who initiated it.
async fn settle_reliability(
    store: &dyn MatchStore,
    notifier: &dyn Notifier,
    collaboration: &Collaboration,
    target: CollaborationStatus,
) {
    let event = match target {
        CollaborationStatus::Completed => ReliabilityEvent::CollaborationCompleted,
        CollaborationStatus::Cancelled => ReliabilityEvent::CollaborationCancelled,
        _ => return,
    };

    apply_reliability_event(
        store,
        notifier,
        &collaboration.creator_id,
        PartyRole::Creator,
        event,
    )
    .await;
    apply_reliability_event(
        store,
        notifier,
        &collaboration.seller_id,
        PartyRole::Seller,
        event,
    )
    .await;
}

/// Apply one reliability event to one user's score. Soft failure: a store
/// error is logged and the new score reported as None; reliability is a
/// derived signal and must not fail the primary operation.
///
/// A completion event that moves the creator's score upward across a bucket
/// boundary emits exactly one milestone notification.
pub async fn apply_reliability_event(
    store: &dyn MatchStore,
    notifier: &dyn Notifier,
    user_id: &str,
    role: PartyRole,
    event: ReliabilityEvent,
) -> Option<f64> {
    let (before, after) = match store.adjust_reliability(user_id, role, event.delta()).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(
                "Reliability update {:?} for {} failed, continuing: {}",
                event,
                user_id,
                e
            );
            return None;
        }
    };

    tracing::debug!(
        "Reliability {:?} for {} ({:?}): {:.2} -> {:.2}",
        event,
        user_id,
        role,
        before,
        after
    );

    if event == ReliabilityEvent::CollaborationCompleted && role == PartyRole::Creator {
        if let Some(level) = milestone_crossed(before, after) {
            notifier
                .notify(
                    user_id,
                    NotificationKind::ReliabilityMilestone,
                    serde_json::json!({
                        "level": level.label(),
                        "score": after,
                    }),
                )
                .await;
        }
    }

    Some(after)
}

/// Update deliverables/milestones while the collaboration is in its editable
/// window. Retries version races like `transition`, rechecking the window
/// against the fresh status each attempt.
pub async fn update_terms(
    store: &dyn MatchStore,
    id: Uuid,
    deliverables: Option<Vec<String>>,
    milestones: Option<Vec<Milestone>>,
) -> Result<Collaboration, LifecycleError> {
    for _ in 0..UPDATE_ATTEMPTS {
        let current = store
            .get_collaboration(id)
            .await
            .map_err(|e| map_store_err(id, e))?;

        if !is_editable(current.status) {
            return Err(LifecycleError::NotEditable {
                id,
                status: current.status,
            });
        }

        let patch = CollaborationPatch {
            deliverables: deliverables.clone(),
            milestones: milestones.clone(),
            expected_version: current.version,
            ..Default::default()
        };

        match store.update_collaboration(id, patch).await {
            Ok(updated) => return Ok(updated),
            Err(StoreError::VersionConflict { .. }) => continue,
            Err(e) => return Err(map_store_err(id, e)),
        }
    }

    Err(LifecycleError::Contention(id))
}

/// Record one party's feedback on a collaboration. A rating of 4.0 or better
/// credits the rated party with a POSITIVE_FEEDBACK reliability event.
pub async fn submit_feedback(
    store: &dyn MatchStore,
    notifier: &dyn Notifier,
    id: Uuid,
    author: PartyRole,
    feedback: Feedback,
) -> Result<Collaboration, LifecycleError> {
    let rating = feedback.rating;
    let mut persisted = None;

    for _ in 0..UPDATE_ATTEMPTS {
        let current = store
            .get_collaboration(id)
            .await
            .map_err(|e| map_store_err(id, e))?;

        let patch = match author {
            PartyRole::Seller => CollaborationPatch {
                seller_feedback: Some(feedback.clone()),
                expected_version: current.version,
                ..Default::default()
            },
            PartyRole::Creator => CollaborationPatch {
                creator_feedback: Some(feedback.clone()),
                expected_version: current.version,
                ..Default::default()
            },
        };

        match store.update_collaboration(id, patch).await {
            Ok(updated) => {
                persisted = Some(updated);
                break;
            }
            Err(StoreError::VersionConflict { .. }) => continue,
            Err(e) => return Err(map_store_err(id, e)),
        }
    }

    let persisted = persisted.ok_or(LifecycleError::Contention(id))?;

    if rating >= 4.0 {
        let (rated_id, rated_role) = match author {
            PartyRole::Seller => (persisted.creator_id.clone(), PartyRole::Creator),
            PartyRole::Creator => (persisted.seller_id.clone(), PartyRole::Seller),
        };
        apply_reliability_event(
            store,
            notifier,
            &rated_id,
            rated_role,
            ReliabilityEvent::PositiveFeedback,
        )
        .await;
    }

    Ok(persisted)
}

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::filters::{filter_candidates, CandidateFilter};
use crate::models::{
    Collaboration, CreatorCandidate, MatchFeedback, OutreachRecord, PartyRole, UserActivity,
    UserIntent,
};
use crate::services::store::{CollaborationPatch, MatchStore, StoreError};

/// Reliability scores start here for users with no ledger history.
const DEFAULT_RELIABILITY: f64 = 3.0;

const RELIABILITY_MIN: f64 = 0.5;
const RELIABILITY_MAX: f64 = 5.0;

#[derive(Default)]
struct Inner {
    candidates: Vec<CreatorCandidate>,
    collaborations: HashMap<Uuid, Collaboration>,
    reliability: HashMap<(String, PartyRole), f64>,
    intents: HashMap<String, UserIntent>,
    feedback: HashMap<String, Vec<MatchFeedback>>,
    outreach: HashMap<String, Vec<OutreachRecord>>,
    activity: HashMap<String, UserActivity>,
}

/// In-memory `MatchStore` used by the binary and the test suite.
///
/// A single RwLock guards all state; every write path takes the write lock
/// for its whole read-modify-write, which is what serializes concurrent
/// reliability deltas and collaboration updates.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_candidates(&self, candidates: Vec<CreatorCandidate>) {
        self.inner.write().await.candidates.extend(candidates);
    }

    pub async fn seed_intent(&self, user_id: &str, intent: UserIntent) {
        self.inner.write().await.intents.insert(user_id.to_string(), intent);
    }

    pub async fn seed_outreach(&self, creator_id: &str, records: Vec<OutreachRecord>) {
        self.inner
            .write()
            .await
            .outreach
            .insert(creator_id.to_string(), records);
    }

    pub async fn seed_activity(&self, user_id: &str, activity: UserActivity) {
        self.inner
            .write()
            .await
            .activity
            .insert(user_id.to_string(), activity);
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn find_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<CreatorCandidate>, StoreError> {
        let inner = self.inner.read().await;
        Ok(filter_candidates(inner.candidates.clone(), filter))
    }

    async fn get_candidate(&self, creator_id: &str) -> Result<CreatorCandidate, StoreError> {
        let inner = self.inner.read().await;
        inner
            .candidates
            .iter()
            .find(|c| c.creator_id == creator_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("creator {}", creator_id)))
    }

    async fn get_collaboration(&self, id: Uuid) -> Result<Collaboration, StoreError> {
        let inner = self.inner.read().await;
        inner
            .collaborations
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("collaboration {}", id)))
    }

    async fn insert_collaboration(&self, collaboration: Collaboration) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .collaborations
            .insert(collaboration.id, collaboration);
        Ok(())
    }

    async fn update_collaboration(
        &self,
        id: Uuid,
        patch: CollaborationPatch,
    ) -> Result<Collaboration, StoreError> {
        let mut inner = self.inner.write().await;
        let collab = inner
            .collaborations
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("collaboration {}", id)))?;

        if collab.version != patch.expected_version {
            return Err(StoreError::VersionConflict {
                id,
                expected: patch.expected_version,
                found: collab.version,
            });
        }

        if let Some(status) = patch.status {
            collab.status = status;
        }
        if let Some(history) = patch.status_history {
            collab.status_history = history;
        }
        if let Some(deliverables) = patch.deliverables {
            collab.deliverables = deliverables;
        }
        if let Some(milestones) = patch.milestones {
            collab.milestones = milestones;
        }
        if let Some(feedback) = patch.seller_feedback {
            collab.seller_feedback = Some(feedback);
        }
        if let Some(feedback) = patch.creator_feedback {
            collab.creator_feedback = Some(feedback);
        }
        if let Some(start_date) = patch.start_date {
            collab.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            collab.end_date = Some(end_date);
        }
        collab.version += 1;

        Ok(collab.clone())
    }

    async fn get_reliability(&self, user_id: &str, role: PartyRole) -> Result<f64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reliability
            .get(&(user_id.to_string(), role))
            .copied()
            .unwrap_or(DEFAULT_RELIABILITY))
    }

    async fn set_reliability(
        &self,
        user_id: &str,
        role: PartyRole,
        score: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .reliability
            .insert((user_id.to_string(), role), score.clamp(RELIABILITY_MIN, RELIABILITY_MAX));
        Ok(())
    }

    async fn adjust_reliability(
        &self,
        user_id: &str,
        role: PartyRole,
        delta: f64,
    ) -> Result<(f64, f64), StoreError> {
        // Write lock held across the whole read-modify-write.
        let mut inner = self.inner.write().await;
        let entry = inner
            .reliability
            .entry((user_id.to_string(), role))
            .or_insert(DEFAULT_RELIABILITY);
        let before = *entry;
        let after = (before + delta).clamp(RELIABILITY_MIN, RELIABILITY_MAX);
        *entry = after;
        Ok((before, after))
    }

    async fn get_user_intent(&self, user_id: &str) -> Result<Option<UserIntent>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.intents.get(user_id).cloned())
    }

    async fn get_recent_feedback(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchFeedback>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .feedback
            .get(user_id)
            .map(|rows| rows.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn record_feedback(&self, feedback: MatchFeedback) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .feedback
            .entry(feedback.user_id.clone())
            .or_default()
            .push(feedback);
        Ok(())
    }

    async fn get_outreach_history(
        &self,
        creator_id: &str,
        limit: usize,
    ) -> Result<Vec<OutreachRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .outreach
            .get(creator_id)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn get_user_activity(&self, user_id: &str) -> Result<UserActivity, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.activity.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CollaborationStatus;

    #[tokio::test]
    async fn test_reliability_defaults_and_adjust() {
        let store = InMemoryStore::new();
        assert_eq!(
            store.get_reliability("u1", PartyRole::Creator).await.unwrap(),
            DEFAULT_RELIABILITY
        );

        let (before, after) = store
            .adjust_reliability("u1", PartyRole::Creator, 0.05)
            .await
            .unwrap();
        assert_eq!(before, 3.0);
        assert_eq!(after, 3.05);
    }

    #[tokio::test]
    async fn test_adjust_clamps_both_ends() {
        let store = InMemoryStore::new();
        store.set_reliability("u1", PartyRole::Creator, 4.99).await.unwrap();
        let (_, after) = store
            .adjust_reliability("u1", PartyRole::Creator, 0.05)
            .await
            .unwrap();
        assert_eq!(after, 5.0);

        store.set_reliability("u2", PartyRole::Seller, 0.55).await.unwrap();
        let (_, after) = store
            .adjust_reliability("u2", PartyRole::Seller, -0.10)
            .await
            .unwrap();
        assert_eq!(after, 0.5);
    }

    #[tokio::test]
    async fn test_version_conflict_detected() {
        let store = InMemoryStore::new();
        let collab = Collaboration::new("seller", "creator");
        let id = collab.id;
        store.insert_collaboration(collab).await.unwrap();

        let ok = store
            .update_collaboration(
                id,
                CollaborationPatch {
                    status: Some(CollaborationStatus::Accepted),
                    expected_version: 0,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(ok.version, 1);

        // A second writer still holding version 0 must fail.
        let stale = store
            .update_collaboration(
                id,
                CollaborationPatch {
                    status: Some(CollaborationStatus::Cancelled),
                    expected_version: 0,
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(stale, Err(StoreError::VersionConflict { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_deltas_are_not_lost() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryStore::new());
        store.set_reliability("u1", PartyRole::Creator, 2.0).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.adjust_reliability("u1", PartyRole::Creator, 0.05).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let score = store.get_reliability("u1", PartyRole::Creator).await.unwrap();
        assert!((score - 3.0).abs() < 1e-9);
    }
}

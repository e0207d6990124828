use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::core::filters::CandidateFilter;
use crate::models::{
    Collaboration, CollaborationStatus, CreatorCandidate, Feedback, MatchFeedback, Milestone,
    OutreachRecord, PartyRole, StatusChange, UserActivity, UserIntent,
};

/// Errors surfaced by the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("version conflict on collaboration {id}: expected {expected}, found {found}")]
    VersionConflict { id: Uuid, expected: u64, found: u64 },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Partial update of a collaboration row. Unset fields are left untouched.
/// `expected_version` makes the write conditional: a stale writer gets a
/// `VersionConflict` instead of clobbering a concurrent transition.
#[derive(Debug, Clone, Default)]
pub struct CollaborationPatch {
    pub status: Option<CollaborationStatus>,
    /// Full replacement history (the previous history plus appended entries).
    pub status_history: Option<Vec<StatusChange>>,
    pub deliverables: Option<Vec<String>>,
    pub milestones: Option<Vec<Milestone>>,
    pub seller_feedback: Option<Feedback>,
    pub creator_feedback: Option<Feedback>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub expected_version: u64,
}

/// Read/write interface to the profile, collaboration and reliability store.
///
/// Persistence itself is out of scope; implementations range from the bundled
/// in-memory store to whatever backs production.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Candidate query bounded by the filter's hard cap.
    async fn find_candidates(&self, filter: &CandidateFilter)
        -> Result<Vec<CreatorCandidate>, StoreError>;

    async fn get_candidate(&self, creator_id: &str) -> Result<CreatorCandidate, StoreError>;

    async fn get_collaboration(&self, id: Uuid) -> Result<Collaboration, StoreError>;

    async fn insert_collaboration(&self, collaboration: Collaboration) -> Result<(), StoreError>;

    /// Conditional update; bumps the version on success.
    async fn update_collaboration(
        &self,
        id: Uuid,
        patch: CollaborationPatch,
    ) -> Result<Collaboration, StoreError>;

    /// Current reliability score for a (user, role) pair; defaults for users
    /// with no ledger history yet.
    async fn get_reliability(&self, user_id: &str, role: PartyRole) -> Result<f64, StoreError>;

    async fn set_reliability(
        &self,
        user_id: &str,
        role: PartyRole,
        score: f64,
    ) -> Result<(), StoreError>;

    /// Atomic read-modify-write of a reliability score, clamped to
    /// [0.5, 5.0]. Serialized per user so concurrent deltas cannot lose
    /// updates under the clamp. Returns (before, after).
    async fn adjust_reliability(
        &self,
        user_id: &str,
        role: PartyRole,
        delta: f64,
    ) -> Result<(f64, f64), StoreError>;

    async fn get_user_intent(&self, user_id: &str) -> Result<Option<UserIntent>, StoreError>;

    /// Most-recent-first feedback rows for a requester, at most `limit`.
    async fn get_recent_feedback(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MatchFeedback>, StoreError>;

    async fn record_feedback(&self, feedback: MatchFeedback) -> Result<(), StoreError>;

    /// Most-recent-first outreach records for a creator, at most `limit`.
    async fn get_outreach_history(
        &self,
        creator_id: &str,
        limit: usize,
    ) -> Result<Vec<OutreachRecord>, StoreError>;

    async fn get_user_activity(&self, user_id: &str) -> Result<UserActivity, StoreError>;
}

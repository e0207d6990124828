use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CampaignRequest, CollaborationStatus, CreatorCandidate, Milestone, PartyRole};

/// Request to rank candidates against a campaign.
///
/// When `candidates` is omitted the pool is pulled from the store using the
/// request-derived filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub request: CampaignRequest,
    #[serde(default)]
    pub candidates: Option<Vec<CreatorCandidate>>,
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Request for a single-candidate score breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplainRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "creator_id", rename = "creatorId")]
    pub creator_id: String,
    pub request: CampaignRequest,
}

/// Request to move a collaboration to a new lifecycle state.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TransitionRequest {
    #[serde(alias = "new_status", rename = "newStatus")]
    pub new_status: CollaborationStatus,
    #[validate(length(min = 1))]
    #[serde(alias = "actor_id", rename = "actorId")]
    pub actor_id: String,
}

/// Request to edit deliverables/milestones inside the editable window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTermsRequest {
    #[serde(default)]
    pub deliverables: Option<Vec<String>>,
    #[serde(default)]
    pub milestones: Option<Vec<Milestone>>,
}

/// Request to record one party's feedback on a collaboration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    pub author: PartyRole,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

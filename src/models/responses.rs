use serde::{Deserialize, Serialize};

use crate::models::domain::{Collaboration, CollaborationStatus, MatchResult};

/// Response for the ranking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for collaboration transitions. `ok` mirrors whether the
/// transition was accepted; rejections carry the allowed next states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaboration: Option<Collaboration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "allowedTransitions", skip_serializing_if = "Option::is_none")]
    pub allowed_transitions: Option<Vec<CollaborationStatus>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

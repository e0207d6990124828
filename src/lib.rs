//! Creator Match - creator ranking and collaboration lifecycle engine.
//!
//! This library scores candidate creators against a brand's campaign request
//! with a fixed-weight heuristic, governs the collaboration lifecycle through
//! a strict state machine, and feeds terminal outcomes back into a clamped
//! per-user reliability score that the next ranking pass consumes.

pub mod config;
pub mod core;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{CandidateFilter, RankingPipeline, Weights, CANDIDATE_CAP, RESULT_LIMIT};
pub use models::{
    CampaignRequest, Collaboration, CollaborationStatus, CreatorCandidate, MatchResult, PartyRole,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let weights = Weights::default();
        assert!(weights.validate().is_ok());
        assert_eq!(CANDIDATE_CAP, 100);
        assert_eq!(RESULT_LIMIT, 20);
    }
}

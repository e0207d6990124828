// Core algorithm exports
pub mod filters;
pub mod likelihood;
pub mod pipeline;
pub mod reasons;
pub mod scoring;
pub mod weights;

pub use filters::{filter_candidates, CandidateFilter, CANDIDATE_CAP};
pub use pipeline::{FactorContribution, MatchExplanation, RankingPipeline, RESULT_LIMIT};
pub use reasons::generate_reasons;
pub use weights::{aggregate, classify, Weights};

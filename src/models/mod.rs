// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilityStatus, BudgetValueStatus, CampaignRequest, Collaboration, CollaborationStatus,
    ConfidenceLevel, CreatorCandidate, Feedback, InteractionKind, LikelihoodLevel, Location,
    LocationStatus, LocationType, MatchFeedback, MatchResult, Milestone, OutreachRecord,
    OutreachStatus, PartyRole, PriceRange, PromotionType, ResponseLikelihood, StatusChange,
    SubScores, TravelWillingness, UserActivity, UserIntent,
};
pub use requests::{
    ExplainRequest, FeedbackRequest, RankRequest, TransitionRequest, UpdateTermsRequest,
};
pub use responses::{ErrorResponse, HealthResponse, RankResponse, TransitionResponse};

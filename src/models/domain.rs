use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Creator profile as owned by the profile store. Read-only to the scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorCandidate {
    #[serde(rename = "creatorId")]
    pub creator_id: String,
    pub name: String,
    #[serde(rename = "followerCount")]
    pub follower_count: u64,
    #[serde(rename = "engagementRate")]
    pub engagement_rate: f64,
    pub category: String,
    #[serde(rename = "secondaryCategories", default)]
    pub secondary_categories: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "willingToTravel", default)]
    pub willing_to_travel: Option<TravelWillingness>,
    #[serde(rename = "priceRange", default)]
    pub price_range: Option<PriceRange>,
    #[serde(rename = "collaborationTypes", default)]
    pub collaboration_types: Vec<PromotionType>,
    #[serde(rename = "availabilityStatus", default)]
    pub availability_status: Option<AvailabilityStatus>,
    /// Clamped reputation scalar, invariant 0.5 <= x <= 5.0.
    #[serde(rename = "reliabilityScore", default = "default_reliability")]
    pub reliability_score: f64,
    #[serde(rename = "successfulPromotions", default)]
    pub successful_promotions: u32,
    #[serde(rename = "averageRating", default)]
    pub average_rating: f64,
    #[serde(rename = "aiScore", default)]
    pub ai_score: f64,
    #[serde(rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

pub(crate) fn default_reliability() -> f64 {
    3.0
}

/// Campaign request from a brand. Immutable for the duration of one ranking call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    #[serde(rename = "sellerId", default)]
    pub seller_id: Option<String>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<PriceRange>,
    #[serde(rename = "targetCategory")]
    pub target_category: String,
    #[serde(rename = "promotionType", default)]
    pub promotion_type: Option<PromotionType>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "locationType", default)]
    pub location_type: LocationType,
    #[serde(rename = "minFollowers", default)]
    pub min_followers: Option<u64>,
    #[serde(rename = "maxFollowers", default)]
    pub max_followers: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelWillingness {
    Yes,
    Limited,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    AvailableNow,
    LimitedAvailability,
    NotAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    SponsoredPost,
    ProductReview,
    Giveaway,
    BrandAmbassador,
    Event,
    Onsite,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    #[default]
    Remote,
    Onsite,
    Hybrid,
}

/// The twelve per-factor sub-scores for one (creator, request) pair.
///
/// Every value lies in [0, 100] except `reliability`, which is allowed to
/// reach 150 before weighting. That asymmetry is intentional: highly reliable
/// creators can push the weighted aggregate above 100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub engagement: f64,
    pub niche: f64,
    pub price: f64,
    pub location: f64,
    pub campaign_type: f64,
    pub reliability: f64,
    pub availability: f64,
    pub predicted_roi: f64,
    pub track_record: f64,
    pub insight: f64,
    pub intent: f64,
    pub personalization: f64,
}

/// Qualitative tier derived from the aggregate match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Experimental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    Remote,
    ExactArea,
    SameCity,
    SameState,
    TravelRequired,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetValueStatus {
    UnderBudget,
    WithinBudget,
    SlightlyOver,
    OverBudget,
    Unknown,
}

/// Per-candidate ranking output. Created fresh per ranking call and never
/// persisted as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "creatorId")]
    pub creator_id: String,
    pub name: String,
    #[serde(rename = "subScores")]
    pub sub_scores: SubScores,
    #[serde(rename = "matchScore")]
    pub match_score: i64,
    #[serde(rename = "confidenceLevel")]
    pub confidence_level: ConfidenceLevel,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "responseLikelihood")]
    pub response_likelihood: ResponseLikelihood,
    #[serde(rename = "locationStatus")]
    pub location_status: LocationStatus,
    #[serde(rename = "budgetValueStatus")]
    pub budget_value_status: BudgetValueStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LikelihoodLevel {
    High,
    Medium,
    Low,
    Neutral,
}

/// Responsiveness estimate shown alongside a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseLikelihood {
    pub label: String,
    #[serde(rename = "type")]
    pub level: LikelihoodLevel,
    pub description: String,
}

/// Lifecycle states of a collaboration. The happy path is linear:
/// REQUESTED -> ACCEPTED -> IN_DISCUSSION -> AGREED -> IN_PROGRESS ->
/// COMPLETED. CANCELLED is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollaborationStatus {
    Requested,
    Accepted,
    InDiscussion,
    Agreed,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for CollaborationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CollaborationStatus::Requested => "REQUESTED",
            CollaborationStatus::Accepted => "ACCEPTED",
            CollaborationStatus::InDiscussion => "IN_DISCUSSION",
            CollaborationStatus::Agreed => "AGREED",
            CollaborationStatus::InProgress => "IN_PROGRESS",
            CollaborationStatus::Completed => "COMPLETED",
            CollaborationStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// One entry in a collaboration's append-only status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: CollaborationStatus,
    pub to: CollaborationStatus,
    pub at: DateTime<Utc>,
    #[serde(rename = "actorId")]
    pub actor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// The stateful working relationship created after a match is accepted.
/// Terminal collaborations are retained for audit, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: Uuid,
    #[serde(rename = "sellerId")]
    pub seller_id: String,
    #[serde(rename = "creatorId")]
    pub creator_id: String,
    pub status: CollaborationStatus,
    /// Append-only: only ever replaced by history + [new entry].
    #[serde(rename = "statusHistory", default)]
    pub status_history: Vec<StatusChange>,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(rename = "sellerFeedback", default)]
    pub seller_feedback: Option<Feedback>,
    #[serde(rename = "creatorFeedback", default)]
    pub creator_feedback: Option<Feedback>,
    /// Optimistic concurrency token; bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Collaboration {
    pub fn new(seller_id: impl Into<String>, creator_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seller_id: seller_id.into(),
            creator_id: creator_id.into(),
            status: CollaborationStatus::Requested,
            status_history: Vec::new(),
            start_date: None,
            end_date: None,
            deliverables: Vec::new(),
            milestones: Vec::new(),
            seller_feedback: None,
            creator_feedback: None,
            version: 0,
        }
    }
}

/// The side of a collaboration a reliability record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyRole {
    Creator,
    Seller,
}

/// Prior action a user took on a surfaced match. Append-only log; consumed by
/// personalization scoring, never by the ranking call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    Accepted,
    Rejected,
    Saved,
    Clicked,
    Contacted,
    Abandoned,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFeedback {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "creatorId")]
    pub creator_id: String,
    pub interaction: InteractionKind,
    pub at: DateTime<Utc>,
}

/// Recent search intent for the requesting user, most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIntent {
    #[serde(rename = "recentCategories", default)]
    pub recent_categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutreachStatus {
    Invited,
    Matched,
    Accepted,
    Rejected,
}

/// One invitation/match event on a creator, used for response-likelihood
/// estimation. Stored most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachRecord {
    pub status: OutreachStatus,
    #[serde(rename = "respondedAt", default)]
    pub responded_at: Option<DateTime<Utc>>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserActivity {
    #[serde(rename = "lastLoginAt", default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

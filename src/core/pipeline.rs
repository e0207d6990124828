use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::core::filters::CANDIDATE_CAP;
use crate::core::likelihood;
use crate::core::reasons::generate_reasons;
use crate::core::scoring;
use crate::core::weights::{aggregate, classify, Weights};
use crate::models::{
    CampaignRequest, CreatorCandidate, MatchFeedback, MatchResult, PartyRole, ResponseLikelihood,
    SubScores, UserIntent,
};
use crate::services::predictive::PredictiveService;
use crate::services::store::MatchStore;

/// Ranked results returned per call.
pub const RESULT_LIMIT: usize = 20;

/// Bounded fan-out width for per-candidate scoring. Sized well below the
/// candidate cap so a pathological pool cannot spike resource usage.
const SCORING_CONCURRENCY: usize = 16;

/// How many recent feedback rows inform personalization, loaded once per
/// ranking call.
const FEEDBACK_SAMPLE: usize = 100;

/// Per-factor line in an `explain` breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: String,
    pub score: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Transparency view of a single candidate's score. Not used for ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchExplanation {
    #[serde(rename = "creatorId")]
    pub creator_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: i64,
    pub breakdown: Vec<FactorContribution>,
}

/// Orchestrates filter -> score (fan-out) -> aggregate -> sort -> truncate.
///
/// Candidate scoring is independent per creator and runs in parallel with no
/// shared mutable state; only the final sort imposes order. The sort is
/// stable and descending, so equal scores keep their input order - that is
/// the documented tie-break.
#[derive(Debug, Clone)]
pub struct RankingPipeline {
    weights: Weights,
    concurrency: usize,
    result_limit: usize,
}

impl RankingPipeline {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            concurrency: SCORING_CONCURRENCY,
            result_limit: RESULT_LIMIT,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(Weights::default())
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Score and rank a candidate pool for one campaign request.
    ///
    /// Loads the requester's intent and recent feedback once (not per
    /// candidate), fans scoring out across the pool, and returns the top
    /// results sorted descending by match score. Idempotent for identical
    /// inputs. All-or-nothing: timeouts are the caller's responsibility and
    /// partial results are never returned.
    pub async fn rank(
        &self,
        store: &dyn MatchStore,
        predictive: &dyn PredictiveService,
        request: &CampaignRequest,
        mut candidates: Vec<CreatorCandidate>,
        user_id: Option<&str>,
    ) -> Vec<MatchResult> {
        // Hard cap before any scoring work.
        candidates.truncate(CANDIDATE_CAP);

        let (intent, history) = self.load_requester_context(store, user_id).await;
        let now = Utc::now();

        let mut results: Vec<MatchResult> = stream::iter(candidates)
            .map(|candidate| {
                self.score_candidate(
                    store,
                    predictive,
                    request,
                    candidate,
                    intent.as_ref(),
                    &history,
                    now,
                )
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results.truncate(self.result_limit);
        results
    }

    /// The two sequential reads made once per ranking call. Either failing
    /// degrades personalization to neutral rather than failing the call.
    async fn load_requester_context(
        &self,
        store: &dyn MatchStore,
        user_id: Option<&str>,
    ) -> (Option<UserIntent>, Vec<MatchFeedback>) {
        let uid = match user_id {
            Some(uid) => uid,
            None => return (None, Vec::new()),
        };

        let intent = match store.get_user_intent(uid).await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!("Failed to load intent for {}, scoring without it: {}", uid, e);
                None
            }
        };

        let history = match store.get_recent_feedback(uid, FEEDBACK_SAMPLE).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Failed to load feedback for {}, scoring without it: {}", uid, e);
                Vec::new()
            }
        };

        (intent, history)
    }

    async fn score_candidate(
        &self,
        store: &dyn MatchStore,
        predictive: &dyn PredictiveService,
        request: &CampaignRequest,
        candidate: CreatorCandidate,
        intent: Option<&UserIntent>,
        history: &[MatchFeedback],
        now: DateTime<Utc>,
    ) -> MatchResult {
        let (predicted_roi, insight) =
            match predictive.predict_roi(&candidate.creator_id, request).await {
                Ok(p) => (p.roi.clamp(0.0, 100.0), p.confidence.clamp(0.0, 100.0)),
                Err(e) => {
                    tracing::debug!(
                        "ROI prediction unavailable for {}, using fallback: {}",
                        candidate.creator_id,
                        e
                    );
                    (0.0, 50.0)
                }
            };

        // Fresh ledger read so completed collaborations influence the very
        // next ranking pass; the profile snapshot is the fallback.
        let reliability = store
            .get_reliability(&candidate.creator_id, PartyRole::Creator)
            .await
            .unwrap_or(candidate.reliability_score);

        let (price, budget_value_status) = scoring::price_score(
            candidate.price_range.as_ref(),
            request.budget_range.as_ref(),
        );
        let (location, location_status) = scoring::location_score(
            request.location_type,
            request.location.as_ref(),
            candidate.location.as_ref(),
            candidate.willing_to_travel,
        );

        let sub_scores = SubScores {
            engagement: scoring::engagement_score(
                candidate.engagement_rate,
                candidate.follower_count,
            ),
            niche: scoring::niche_score(&candidate.category, &request.target_category),
            price,
            location,
            campaign_type: scoring::campaign_type_score(
                request.promotion_type,
                &candidate.collaboration_types,
            ),
            reliability: scoring::reliability_score(reliability),
            availability: scoring::availability_score(candidate.availability_status),
            predicted_roi,
            track_record: scoring::track_record_score(
                candidate.successful_promotions,
                candidate.average_rating,
            ),
            insight,
            intent: scoring::intent_score(&candidate.category, intent),
            personalization: scoring::personalization_score(&candidate.creator_id, history),
        };

        let match_score = aggregate(&sub_scores, &self.weights);
        let match_reasons = generate_reasons(match_score, &sub_scores);
        let response_likelihood = self
            .estimate_likelihood(store, &candidate.creator_id, now)
            .await;

        MatchResult {
            creator_id: candidate.creator_id,
            name: candidate.name,
            sub_scores,
            match_score,
            confidence_level: classify(match_score),
            match_reasons,
            response_likelihood,
            location_status,
            budget_value_status,
        }
    }

    async fn estimate_likelihood(
        &self,
        store: &dyn MatchStore,
        creator_id: &str,
        now: DateTime<Utc>,
    ) -> ResponseLikelihood {
        let activity = store
            .get_user_activity(creator_id)
            .await
            .unwrap_or_default();
        let outreach = store
            .get_outreach_history(creator_id, 20)
            .await
            .unwrap_or_default();
        likelihood::estimate(&activity, &outreach, now)
    }

    /// Transparency breakdown over a reduced factor set (engagement, niche,
    /// price, insight, availability, track record, reliability).
    pub async fn explain(
        &self,
        store: &dyn MatchStore,
        predictive: &dyn PredictiveService,
        candidate: &CreatorCandidate,
        request: &CampaignRequest,
    ) -> MatchExplanation {
        let insight = match predictive.predict_roi(&candidate.creator_id, request).await {
            Ok(p) => p.confidence.clamp(0.0, 100.0),
            Err(_) => 50.0,
        };
        let reliability = store
            .get_reliability(&candidate.creator_id, PartyRole::Creator)
            .await
            .unwrap_or(candidate.reliability_score);

        let w = &self.weights;
        let factors: [(&str, f64, f64); 7] = [
            (
                "engagement",
                scoring::engagement_score(candidate.engagement_rate, candidate.follower_count),
                w.engagement,
            ),
            (
                "niche",
                scoring::niche_score(&candidate.category, &request.target_category),
                w.niche,
            ),
            (
                "price",
                scoring::price_score(
                    candidate.price_range.as_ref(),
                    request.budget_range.as_ref(),
                )
                .0,
                w.price,
            ),
            ("insight", insight, w.insight),
            (
                "availability",
                scoring::availability_score(candidate.availability_status),
                w.availability,
            ),
            (
                "trackRecord",
                scoring::track_record_score(
                    candidate.successful_promotions,
                    candidate.average_rating,
                ),
                w.track_record,
            ),
            (
                "reliability",
                scoring::reliability_score(reliability),
                w.reliability,
            ),
        ];

        let breakdown: Vec<FactorContribution> = factors
            .iter()
            .map(|(factor, score, weight)| FactorContribution {
                factor: factor.to_string(),
                score: *score,
                weight: *weight,
                contribution: score * weight,
            })
            .collect();

        let match_score = breakdown.iter().map(|f| f.contribution).sum::<f64>().round() as i64;

        MatchExplanation {
            creator_id: candidate.creator_id.clone(),
            match_score,
            breakdown,
        }
    }
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

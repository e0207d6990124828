use serde::{Deserialize, Serialize};

use crate::models::{CampaignRequest, CreatorCandidate, PromotionType};

/// Hard cap on how many candidates one ranking call will ever score.
///
/// This is an explicit performance safety valve, applied regardless of match
/// quality, not an error condition.
pub const CANDIDATE_CAP: usize = 100;

/// Store-side candidate query derived from a campaign request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFilter {
    #[serde(rename = "targetCategory")]
    pub target_category: String,
    #[serde(rename = "promotionType", default)]
    pub promotion_type: Option<PromotionType>,
    #[serde(rename = "minFollowers", default)]
    pub min_followers: Option<u64>,
    #[serde(rename = "maxFollowers", default)]
    pub max_followers: Option<u64>,
    /// Budget ceiling: candidates whose floor price exceeds this are skipped.
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    pub limit: usize,
}

impl CandidateFilter {
    pub fn from_request(request: &CampaignRequest) -> Self {
        Self {
            target_category: request.target_category.clone(),
            promotion_type: request.promotion_type,
            min_followers: request.min_followers,
            max_followers: request.max_followers,
            max_budget: request.budget_range.as_ref().map(|b| b.max),
            limit: CANDIDATE_CAP,
        }
    }

    /// Whether a candidate passes the pre-scoring filter. This is coarse by
    /// design: scoring, not filtering, decides fine-grained fit.
    pub fn matches(&self, candidate: &CreatorCandidate) -> bool {
        if !candidate.is_available {
            return false;
        }

        if let Some(min) = self.min_followers {
            if candidate.follower_count < min {
                return false;
            }
        }
        if let Some(max) = self.max_followers {
            if candidate.follower_count > max {
                return false;
            }
        }

        let target = self.target_category.trim().to_lowercase();
        let category_ok = candidate.category.trim().to_lowercase() == target
            || candidate
                .secondary_categories
                .iter()
                .any(|c| c.trim().to_lowercase() == target);
        if !category_ok {
            return false;
        }

        // Promotion-type overlap, lenient on missing data. The on-site /
        // event-flavored pairing is allowed through so scoring can award its
        // partial credit.
        if let Some(requested) = self.promotion_type {
            if !candidate.collaboration_types.is_empty() {
                let supported = candidate.collaboration_types.contains(&requested);
                let event_flavored = matches!(
                    requested,
                    PromotionType::Event | PromotionType::Hybrid
                ) && candidate.collaboration_types.contains(&PromotionType::Onsite);
                if !supported && !event_flavored {
                    return false;
                }
            }
        }

        if let (Some(ceiling), Some(range)) = (self.max_budget, &candidate.price_range) {
            if range.min > ceiling {
                return false;
            }
        }

        true
    }
}

/// Apply a filter to an in-memory candidate pool, enforcing the hard cap.
pub fn filter_candidates(
    candidates: Vec<CreatorCandidate>,
    filter: &CandidateFilter,
) -> Vec<CreatorCandidate> {
    let cap = filter.limit.min(CANDIDATE_CAP);
    candidates
        .into_iter()
        .filter(|c| filter.matches(c))
        .take(cap)
        .collect()
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ConfidenceLevel, SubScores};

/// Aggregation weight table. All twelve values must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weights {
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

impl Default for Weights {
    fn default() -> Self {
        Self {
            engagement: 0.11,
            niche: 0.11,
            price: 0.11,
            location: 0.08,
            campaign_type: 0.08,
            reliability: 0.08,
            availability: 0.08,
            predicted_roi: 0.07,
            track_record: 0.07,
            insight: 0.07,
            intent: 0.07,
            personalization: 0.07,
        }
    }
}

#[derive(Debug, Error)]
#[error("weight table must sum to 1.0, got {sum}")]
pub struct InvalidWeights {
    pub sum: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.engagement
            + self.niche
            + self.price
            + self.location
            + self.campaign_type
            + self.reliability
            + self.availability
            + self.predicted_roi
            + self.track_record
            + self.insight
            + self.intent
            + self.personalization
    }

    /// Startup assertion for the sum invariant. Call once when the table is
    /// loaded from config rather than trusting call sites.
    pub fn validate(&self) -> Result<(), InvalidWeights> {
        let sum = self.sum();
        if (sum - 1.0).abs() <= 1e-6 {
            Ok(())
        } else {
            Err(InvalidWeights { sum })
        }
    }
}

/// Weighted aggregate match score. Because the reliability sub-score can reach
/// 150, the aggregate can legitimately exceed 100 for highly reliable
/// creators.
pub fn aggregate(scores: &SubScores, weights: &Weights) -> i64 {
    let total = scores.engagement * weights.engagement
        + scores.niche * weights.niche
        + scores.price * weights.price
        + scores.location * weights.location
        + scores.campaign_type * weights.campaign_type
        + scores.reliability * weights.reliability
        + scores.availability * weights.availability
        + scores.predicted_roi * weights.predicted_roi
        + scores.track_record * weights.track_record
        + scores.insight * weights.insight
        + scores.intent * weights.intent
        + scores.personalization * weights.personalization;

    total.round() as i64
}

/// Bucket an aggregate score into a qualitative tier.
pub fn classify(match_score: i64) -> ConfidenceLevel {
    if match_score >= 85 {
        ConfidenceLevel::High
    } else if match_score >= 65 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Experimental
    }
}

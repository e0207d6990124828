use crate::models::{
    AvailabilityStatus, BudgetValueStatus, Location, LocationStatus, LocationType, MatchFeedback,
    PriceRange, PromotionType, TravelWillingness, UserIntent,
};

/// Pure per-factor scoring functions for a (creator, request) pair.
///
/// Every function here is total: missing optional inputs score a neutral 50
/// rather than failing, so ranking never fails because one candidate has
/// sparse data. All outputs lie in [0, 100] except [`reliability_score`],
/// which is capped at 150 before weighting.

/// Engagement rate scored against a follower-tier benchmark.
///
/// Benchmark: 4.0% under 50k followers, 2.5% under 500k, 1.5% above.
/// Score = min(100, rate / benchmark * 50), floored. Monotonic in rate.
#[inline]
pub fn engagement_score(engagement_rate: f64, follower_count: u64) -> f64 {
    let benchmark = if follower_count < 50_000 {
        4.0
    } else if follower_count < 500_000 {
        2.5
    } else {
        1.5
    };

    ((engagement_rate / benchmark) * 50.0).min(100.0).max(0.0).floor()
}

/// Pairs of categories considered adjacent for niche scoring. Lookup is
/// order-insensitive, so listing one direction is enough.
const ADJACENT_CATEGORIES: &[(&str, &str)] = &[
    ("fashion", "beauty"),
    ("fashion", "lifestyle"),
    ("beauty", "lifestyle"),
    ("beauty", "skincare"),
    ("fitness", "health"),
    ("fitness", "sports"),
    ("health", "food"),
    ("food", "travel"),
    ("travel", "lifestyle"),
    ("tech", "gaming"),
    ("gaming", "entertainment"),
    ("music", "entertainment"),
    ("parenting", "lifestyle"),
    ("education", "business"),
];

/// Exact category match scores 100, an adjacent category 50, anything else 0.
pub fn niche_score(creator_category: &str, target_category: &str) -> f64 {
    let creator = creator_category.trim().to_lowercase();
    let target = target_category.trim().to_lowercase();

    if creator == target {
        return 100.0;
    }

    let adjacent = ADJACENT_CATEGORIES.iter().any(|(a, b)| {
        (*a == creator && *b == target) || (*a == target && *b == creator)
    });

    if adjacent {
        50.0
    } else {
        0.0
    }
}

/// Price compatibility between the creator's rate card and the campaign budget,
/// plus the budget-value label derived from the same relationship.
///
/// Overlapping ranges score 85 plus up to 15 points of coverage. A creator
/// priced entirely above budget degrades in tiers (65 within 15% over, 40
/// within 30%, then 0); entirely below budget scores 90.
pub fn price_score(
    creator_range: Option<&PriceRange>,
    budget: Option<&PriceRange>,
) -> (f64, BudgetValueStatus) {
    let (creator, budget) = match (creator_range, budget) {
        (Some(c), Some(b)) => (c, b),
        // Sparse data: neutral, never an error.
        _ => return (50.0, BudgetValueStatus::Unknown),
    };

    let overlap = creator.max.min(budget.max) - creator.min.max(budget.min);
    if overlap > 0.0 {
        let span = creator.max - creator.min;
        let coverage = overlap / span;
        let score = (85.0 + coverage * 15.0).round().min(100.0);
        return (score, BudgetValueStatus::WithinBudget);
    }

    if creator.min > budget.max {
        // Entirely above budget: tiered by how far over the ceiling.
        let over = (creator.min - budget.max) / budget.max;
        return if over <= 0.15 {
            (65.0, BudgetValueStatus::SlightlyOver)
        } else if over <= 0.30 {
            (40.0, BudgetValueStatus::SlightlyOver)
        } else {
            (0.0, BudgetValueStatus::OverBudget)
        };
    }

    if creator.max < budget.min {
        return (90.0, BudgetValueStatus::UnderBudget);
    }

    // Unreachable for well-formed ranges; kept deliberately as the original
    // algorithm's fallback. Do not repurpose.
    (50.0, BudgetValueStatus::Unknown)
}

/// Promotion history and ratings. Base 50, bonus tiers for volume and quality,
/// capped at 100.
pub fn track_record_score(successful_promotions: u32, average_rating: f64) -> f64 {
    let mut score: f64 = 50.0;

    score += if successful_promotions >= 10 {
        30.0
    } else if successful_promotions >= 5 {
        20.0
    } else if successful_promotions >= 1 {
        10.0
    } else {
        0.0
    };

    score += if average_rating >= 4.5 {
        20.0
    } else if average_rating >= 4.0 {
        15.0
    } else if average_rating >= 3.5 {
        10.0
    } else {
        0.0
    };

    score.min(100.0)
}

/// How well the creator's category lines up with the requester's recent
/// searches. No signal is neutral; a stale near-miss is an active negative.
pub fn intent_score(creator_category: &str, intent: Option<&UserIntent>) -> f64 {
    let recent = match intent {
        Some(i) if !i.recent_categories.is_empty() => &i.recent_categories,
        _ => return 50.0,
    };

    let category = creator_category.trim().to_lowercase();
    if recent[0].trim().to_lowercase() == category {
        return 100.0;
    }
    if recent.iter().any(|c| c.trim().to_lowercase() == category) {
        return 75.0;
    }
    0.0
}

/// Past interactions between the requester and this exact creator. Base 50,
/// adjusted per qualifying event, clamped to [0, 100].
pub fn personalization_score(creator_id: &str, history: &[MatchFeedback]) -> f64 {
    use crate::models::InteractionKind::*;

    let mut score: f64 = 50.0;
    for fb in history.iter().filter(|fb| fb.creator_id == creator_id) {
        score += match fb.interaction {
            Accepted | Completed => 30.0,
            Saved | Clicked | Contacted => 10.0,
            Rejected | Abandoned => -20.0,
        };
    }
    score.clamp(0.0, 100.0)
}

/// Geographic fit between campaign and creator, plus the display status.
///
/// Remote campaigns ignore geography entirely. For on-site work, district
/// beats city beats state; cross-state only counts when the creator will
/// travel. Missing location data on either side is neutral.
pub fn location_score(
    location_type: LocationType,
    request_location: Option<&Location>,
    creator_location: Option<&Location>,
    willing_to_travel: Option<TravelWillingness>,
) -> (f64, LocationStatus) {
    if location_type == LocationType::Remote {
        return (100.0, LocationStatus::Remote);
    }

    let (req, creator) = match (request_location, creator_location) {
        (Some(r), Some(c)) => (r, c),
        _ => return (50.0, LocationStatus::Unknown),
    };

    if field_eq(&req.district, &creator.district) {
        return (100.0, LocationStatus::ExactArea);
    }
    if field_eq(&req.city, &creator.city) {
        return (90.0, LocationStatus::SameCity);
    }

    let travel = willing_to_travel.unwrap_or(TravelWillingness::No);
    match (&req.state, &creator.state) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => {
            let score = match travel {
                TravelWillingness::Yes => 80.0,
                TravelWillingness::Limited => 60.0,
                TravelWillingness::No => 40.0,
            };
            (score, LocationStatus::SameState)
        }
        (Some(_), Some(_)) => {
            if travel == TravelWillingness::Yes {
                (50.0, LocationStatus::TravelRequired)
            } else {
                (0.0, LocationStatus::TravelRequired)
            }
        }
        _ => (50.0, LocationStatus::Unknown),
    }
}

fn field_eq(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if !x.is_empty() && x.eq_ignore_ascii_case(y))
}

/// Whether the creator supports the requested promotion format. On-site
/// creators get partial credit for event-flavored campaigns.
pub fn campaign_type_score(
    promotion_type: Option<PromotionType>,
    supported: &[PromotionType],
) -> f64 {
    let requested = match promotion_type {
        Some(t) => t,
        None => return 50.0,
    };

    if supported.contains(&requested) {
        return 100.0;
    }

    let event_flavored =
        requested == PromotionType::Event || requested == PromotionType::Hybrid;
    if event_flavored && supported.contains(&PromotionType::Onsite) {
        return 80.0;
    }

    0.0
}

/// Availability scoring fails open: unknown availability is treated as fully
/// available rather than penalized.
pub fn availability_score(status: Option<AvailabilityStatus>) -> f64 {
    match status {
        Some(AvailabilityStatus::AvailableNow) | None => 100.0,
        Some(AvailabilityStatus::LimitedAvailability) => 70.0,
        Some(AvailabilityStatus::NotAvailable) => 40.0,
    }
}

/// Normalized reliability sub-score. Capped at 150, not 100: this is the one
/// factor allowed to exceed the usual ceiling before weighting.
#[inline]
pub fn reliability_score(reliability: f64) -> f64 {
    (reliability * 100.0).min(150.0).max(0.0)
}

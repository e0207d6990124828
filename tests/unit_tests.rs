// Unit tests for Creator Match

use creator_match::core::{
    aggregate, classify, likelihood,
    reasons::generate_reasons,
    scoring::{
        availability_score, campaign_type_score, engagement_score, intent_score, location_score,
        niche_score, personalization_score, price_score, reliability_score, track_record_score,
    },
    Weights,
};
use creator_match::lifecycle::reliability::{
    apply_event, milestone_crossed, ReliabilityEvent, ReliabilityLevel, RELIABILITY_MAX,
    RELIABILITY_MIN,
};
use creator_match::lifecycle::state_machine::{
    allowed_transitions, apply_transition, is_editable, is_terminal, validate_transition,
    TransitionError,
};
use creator_match::models::{
    AvailabilityStatus, BudgetValueStatus, Collaboration, CollaborationStatus, ConfidenceLevel,
    LikelihoodLevel, Location, LocationStatus, LocationType, OutreachRecord, OutreachStatus,
    PriceRange, PromotionType, SubScores, TravelWillingness, UserActivity, UserIntent,
};
use chrono::{Duration, Utc};

#[test]
fn test_engagement_rate_against_tier_benchmark() {
    // 5.0% rate on a 20k account: benchmark 4.0, 5.0/4.0 * 50 = 62.5, floored
    assert_eq!(engagement_score(5.0, 20_000), 62.0);

    // Same rate against the mid and large tiers
    assert_eq!(engagement_score(5.0, 100_000), 100.0);
    assert_eq!(engagement_score(1.5, 1_000_000), 50.0);

    // Bounds hold for degenerate inputs
    assert_eq!(engagement_score(0.0, 10_000), 0.0);
    assert_eq!(engagement_score(100.0, 10_000), 100.0);
}

#[test]
fn test_niche_adjacency_is_symmetric() {
    assert_eq!(niche_score("Fashion", "Fashion"), 100.0);
    assert_eq!(niche_score("fashion", "FASHION"), 100.0);
    assert_eq!(niche_score("Fashion", "Beauty"), 50.0);
    assert_eq!(niche_score("Beauty", "Fashion"), 50.0);
    assert_eq!(niche_score("Tech", "Gaming"), 50.0);
    assert_eq!(niche_score("Tech", "Fashion"), 0.0);
}

#[test]
fn test_price_overlap_rewards_coverage() {
    // Creator [200,500] against budget [300,600]: overlap 200 of span 300 -> 95
    let creator = PriceRange { min: 200.0, max: 500.0 };
    let budget = PriceRange { min: 300.0, max: 600.0 };
    let (score, status) = price_score(Some(&creator), Some(&budget));
    assert_eq!(score, 95.0);
    assert_eq!(status, BudgetValueStatus::WithinBudget);

    // Full containment maxes out coverage
    let contained = PriceRange { min: 350.0, max: 550.0 };
    let (score, _) = price_score(Some(&contained), Some(&budget));
    assert_eq!(score, 100.0);
}

#[test]
fn test_price_above_budget_degrades_in_tiers() {
    let budget = PriceRange { min: 100.0, max: 1000.0 };

    let slightly = PriceRange { min: 1100.0, max: 1500.0 };
    let (score, status) = price_score(Some(&slightly), Some(&budget));
    assert_eq!(score, 65.0);
    assert_eq!(status, BudgetValueStatus::SlightlyOver);

    let moderately = PriceRange { min: 1250.0, max: 1500.0 };
    assert_eq!(price_score(Some(&moderately), Some(&budget)).0, 40.0);

    let way_over = PriceRange { min: 2000.0, max: 3000.0 };
    let (score, status) = price_score(Some(&way_over), Some(&budget));
    assert_eq!(score, 0.0);
    assert_eq!(status, BudgetValueStatus::OverBudget);
}

#[test]
fn test_price_below_budget_and_missing_data() {
    let budget = PriceRange { min: 500.0, max: 1000.0 };
    let cheap = PriceRange { min: 100.0, max: 300.0 };
    let (score, status) = price_score(Some(&cheap), Some(&budget));
    assert_eq!(score, 90.0);
    assert_eq!(status, BudgetValueStatus::UnderBudget);

    let (score, status) = price_score(None, Some(&budget));
    assert_eq!(score, 50.0);
    assert_eq!(status, BudgetValueStatus::Unknown);
    assert_eq!(price_score(Some(&cheap), None).0, 50.0);
}

#[test]
fn test_track_record_tiers_cap_at_100() {
    assert_eq!(track_record_score(0, 0.0), 50.0);
    assert_eq!(track_record_score(1, 3.5), 70.0);
    assert_eq!(track_record_score(5, 4.0), 85.0);
    assert_eq!(track_record_score(10, 4.5), 100.0);
    assert_eq!(track_record_score(100, 5.0), 100.0);
}

#[test]
fn test_intent_most_recent_beats_older() {
    let intent = UserIntent {
        recent_categories: vec!["Fashion".to_string(), "Beauty".to_string()],
    };
    assert_eq!(intent_score("Fashion", Some(&intent)), 100.0);
    assert_eq!(intent_score("Beauty", Some(&intent)), 75.0);
    assert_eq!(intent_score("Gaming", Some(&intent)), 0.0);
    assert_eq!(intent_score("Fashion", None), 50.0);
}

#[test]
fn test_personalization_without_history_is_neutral() {
    assert_eq!(personalization_score("c1", &[]), 50.0);
}

#[test]
fn test_location_remote_ignores_geography() {
    let (score, status) = location_score(LocationType::Remote, None, None, None);
    assert_eq!(score, 100.0);
    assert_eq!(status, LocationStatus::Remote);
}

#[test]
fn test_location_onsite_hierarchy() {
    let req = Location {
        district: Some("Mitte".to_string()),
        city: Some("Berlin".to_string()),
        state: Some("Berlin".to_string()),
    };

    let same_district = req.clone();
    let (score, status) =
        location_score(LocationType::Onsite, Some(&req), Some(&same_district), None);
    assert_eq!(score, 100.0);
    assert_eq!(status, LocationStatus::ExactArea);

    let same_city = Location {
        district: Some("Kreuzberg".to_string()),
        ..req.clone()
    };
    let (score, status) =
        location_score(LocationType::Onsite, Some(&req), Some(&same_city), None);
    assert_eq!(score, 90.0);
    assert_eq!(status, LocationStatus::SameCity);
}

#[test]
fn test_location_travel_willingness_matters() {
    let req = Location {
        district: None,
        city: Some("Munich".to_string()),
        state: Some("Bavaria".to_string()),
    };
    let same_state = Location {
        district: None,
        city: Some("Nuremberg".to_string()),
        state: Some("Bavaria".to_string()),
    };
    let other_state = Location {
        district: None,
        city: Some("Hamburg".to_string()),
        state: Some("Hamburg".to_string()),
    };

    let score = |creator: &Location, travel| {
        location_score(LocationType::Onsite, Some(&req), Some(creator), travel).0
    };

    assert_eq!(score(&same_state, Some(TravelWillingness::Yes)), 80.0);
    assert_eq!(score(&same_state, Some(TravelWillingness::Limited)), 60.0);
    assert_eq!(score(&same_state, None), 40.0);

    // Cross-state only counts with full travel willingness
    assert_eq!(score(&other_state, Some(TravelWillingness::Yes)), 50.0);
    assert_eq!(score(&other_state, Some(TravelWillingness::Limited)), 0.0);
    assert_eq!(score(&other_state, None), 0.0);
}

#[test]
fn test_campaign_type_partial_credit_for_onsite() {
    let supported = vec![PromotionType::Onsite];
    assert_eq!(campaign_type_score(Some(PromotionType::Event), &supported), 80.0);
    assert_eq!(campaign_type_score(Some(PromotionType::Hybrid), &supported), 80.0);
    assert_eq!(campaign_type_score(Some(PromotionType::Onsite), &supported), 100.0);
    assert_eq!(campaign_type_score(Some(PromotionType::Giveaway), &supported), 0.0);
    assert_eq!(campaign_type_score(None, &supported), 50.0);
}

#[test]
fn test_availability_fails_open() {
    assert_eq!(availability_score(None), 100.0);
    assert_eq!(availability_score(Some(AvailabilityStatus::AvailableNow)), 100.0);
    assert_eq!(availability_score(Some(AvailabilityStatus::LimitedAvailability)), 70.0);
    assert_eq!(availability_score(Some(AvailabilityStatus::NotAvailable)), 40.0);
}

#[test]
fn test_reliability_subscore_caps_at_150() {
    assert_eq!(reliability_score(3.0), 150.0);
    assert_eq!(reliability_score(1.5), 150.0);
    assert_eq!(reliability_score(1.2), 120.0);
    assert_eq!(reliability_score(0.5), 50.0);
    assert_eq!(reliability_score(5.0), 150.0);
}

#[test]
fn test_weight_table_invariant() {
    let weights = Weights::default();
    assert!((weights.sum() - 1.0).abs() < 1e-6);
    assert!(weights.validate().is_ok());

    let mut broken = weights;
    broken.niche = 0.2;
    assert!(broken.validate().is_err());
}

#[test]
fn test_aggregate_monotonic_in_any_subscore() {
    let base = SubScores {
        engagement: 60.0,
        niche: 60.0,
        price: 60.0,
        location: 60.0,
        campaign_type: 60.0,
        reliability: 60.0,
        availability: 60.0,
        predicted_roi: 60.0,
        track_record: 60.0,
        insight: 60.0,
        intent: 60.0,
        personalization: 60.0,
    };
    let weights = Weights::default();
    let baseline = aggregate(&base, &weights);

    let mut bumped = base;
    bumped.engagement = 100.0;
    assert!(aggregate(&bumped, &weights) > baseline);

    let mut bumped = base;
    bumped.reliability = 150.0;
    assert!(aggregate(&bumped, &weights) > baseline);
}

#[test]
fn test_confidence_classification() {
    assert_eq!(classify(110), ConfidenceLevel::High);
    assert_eq!(classify(85), ConfidenceLevel::High);
    assert_eq!(classify(84), ConfidenceLevel::Medium);
    assert_eq!(classify(65), ConfidenceLevel::Medium);
    assert_eq!(classify(64), ConfidenceLevel::Experimental);
}

#[test]
fn test_reason_count_bounded() {
    // All-perfect scores trip many rules, but at most 3 reasons surface
    let scores = SubScores {
        engagement: 100.0,
        niche: 100.0,
        price: 100.0,
        location: 100.0,
        campaign_type: 100.0,
        reliability: 150.0,
        availability: 100.0,
        predicted_roi: 100.0,
        track_record: 100.0,
        insight: 100.0,
        intent: 100.0,
        personalization: 100.0,
    };
    let reasons = generate_reasons(100, &scores);
    assert!(!reasons.is_empty());
    assert!(reasons.len() <= 3);

    // All-zero scores only trip the low-reliability caveat
    let reasons = generate_reasons(0, &SubScores::default());
    assert_eq!(reasons, vec!["Still building a collaboration history".to_string()]);
}

#[test]
fn test_state_machine_happy_path_and_cancel() {
    use CollaborationStatus::*;

    let path = [Requested, Accepted, InDiscussion, Agreed, InProgress, Completed];
    for pair in path.windows(2) {
        assert!(validate_transition(pair[0], pair[1]).is_ok());
    }
    for state in [Requested, Accepted, InDiscussion, Agreed, InProgress] {
        assert!(validate_transition(state, Cancelled).is_ok());
        assert!(!is_terminal(state));
    }
    assert!(is_terminal(Completed));
    assert!(is_terminal(Cancelled));
    assert!(allowed_transitions(Completed).is_empty());
}

#[test]
fn test_state_machine_rejects_skips_and_terminal_exits() {
    use CollaborationStatus::*;

    let err = validate_transition(Requested, Agreed).unwrap_err();
    assert!(matches!(err, TransitionError::NotAllowed { .. }));
    assert_eq!(err.allowed(), &[Accepted, Cancelled]);

    let err = validate_transition(Completed, Cancelled).unwrap_err();
    assert!(matches!(err, TransitionError::Terminal { .. }));
    assert!(err.allowed().is_empty());
}

#[test]
fn test_history_is_append_only() {
    let collab = Collaboration::new("seller", "creator");
    let now = Utc::now();

    let accepted =
        apply_transition(&collab, CollaborationStatus::Accepted, "seller", now).unwrap();
    let discussing =
        apply_transition(&accepted, CollaborationStatus::InDiscussion, "creator", now).unwrap();

    // Each step extends, never rewrites, the earlier entries
    assert_eq!(discussing.status_history.len(), 2);
    assert_eq!(discussing.status_history[0].to, CollaborationStatus::Accepted);
    assert_eq!(discussing.status_history[1].from, CollaborationStatus::Accepted);
    assert!(accepted.status_history.len() == 1);
    assert!(collab.status_history.is_empty());
}

#[test]
fn test_editable_window_spans_accepted_to_in_progress() {
    use CollaborationStatus::*;
    assert!(!is_editable(Requested));
    for state in [Accepted, InDiscussion, Agreed, InProgress] {
        assert!(is_editable(state));
    }
    assert!(!is_editable(Completed));
    assert!(!is_editable(Cancelled));
}

#[test]
fn test_reliability_delta_table_and_clamp() {
    assert_eq!(ReliabilityEvent::CollaborationCompleted.delta(), 0.05);
    assert_eq!(ReliabilityEvent::PositiveFeedback.delta(), 0.02);
    assert_eq!(ReliabilityEvent::CollaborationCancelled.delta(), -0.10);
    assert_eq!(ReliabilityEvent::DeclinedInvite.delta(), -0.03);
    assert_eq!(ReliabilityEvent::RejectedApplication.delta(), -0.01);

    assert_eq!(apply_event(4.98, ReliabilityEvent::CollaborationCompleted), RELIABILITY_MAX);
    assert_eq!(apply_event(0.55, ReliabilityEvent::CollaborationCancelled), RELIABILITY_MIN);
}

#[test]
fn test_reliability_buckets_and_milestones() {
    assert_eq!(ReliabilityLevel::for_score(4.0), ReliabilityLevel::Elite);
    assert_eq!(ReliabilityLevel::for_score(3.0), ReliabilityLevel::Reliable);
    assert_eq!(ReliabilityLevel::for_score(2.0), ReliabilityLevel::RisingStar);
    assert_eq!(ReliabilityLevel::for_score(1.2), ReliabilityLevel::Standard);
    assert_eq!(ReliabilityLevel::for_score(0.5), ReliabilityLevel::BuildingTrust);

    // Crossing 1.2 upward earns a milestone; staying put or dropping does not
    assert_eq!(milestone_crossed(1.18, 1.23), Some(ReliabilityLevel::Standard));
    assert_eq!(milestone_crossed(1.23, 1.28), None);
    assert_eq!(milestone_crossed(2.05, 1.95), None);
}

#[test]
fn test_likelihood_thresholds() {
    let now = Utc::now();
    let active = UserActivity {
        last_login_at: Some(now - Duration::days(2)),
    };
    let stale = UserActivity {
        last_login_at: Some(now - Duration::days(60)),
    };

    let record = |responded: bool| OutreachRecord {
        status: OutreachStatus::Invited,
        responded_at: responded.then_some(now),
        at: now,
    };

    // Inactivity overrides any outreach history
    let busy: Vec<_> = (0..10).map(|_| record(true)).collect();
    assert_eq!(likelihood::estimate(&stale, &busy, now).level, LikelihoodLevel::Low);

    // Thin history is neutral rather than penalized
    let thin = vec![record(true), record(false)];
    let est = likelihood::estimate(&active, &thin, now);
    assert_eq!(est.level, LikelihoodLevel::Neutral);
    assert_eq!(est.label, "New to platform");

    // 7/10 is High, 4/10 Medium, 2/10 Low
    let mut seven = vec![record(false); 3];
    seven.extend(std::iter::repeat_with(|| record(true)).take(7));
    assert_eq!(likelihood::estimate(&active, &seven, now).level, LikelihoodLevel::High);

    let mut four = vec![record(false); 6];
    four.extend(std::iter::repeat_with(|| record(true)).take(4));
    assert_eq!(likelihood::estimate(&active, &four, now).level, LikelihoodLevel::Medium);

    let mut two = vec![record(false); 8];
    two.extend(std::iter::repeat_with(|| record(true)).take(2));
    let est = likelihood::estimate(&active, &two, now);
    assert_eq!(est.level, LikelihoodLevel::Low);
    assert_eq!(est.label, "Selective");
}

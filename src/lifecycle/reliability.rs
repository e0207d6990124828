use serde::{Deserialize, Serialize};

/// Bounds of the reliability scale.
pub const RELIABILITY_MIN: f64 = 0.5;
pub const RELIABILITY_MAX: f64 = 5.0;

/// Events that move a reliability score. The delta table is fixed; scores are
/// only ever mutated through these events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReliabilityEvent {
    CollaborationCompleted,
    PositiveFeedback,
    CollaborationCancelled,
    DeclinedInvite,
    RejectedApplication,
}

impl ReliabilityEvent {
    pub fn delta(self) -> f64 {
        match self {
            ReliabilityEvent::CollaborationCompleted => 0.05,
            ReliabilityEvent::PositiveFeedback => 0.02,
            ReliabilityEvent::CollaborationCancelled => -0.10,
            ReliabilityEvent::DeclinedInvite => -0.03,
            ReliabilityEvent::RejectedApplication => -0.01,
        }
    }
}

/// Apply an event's delta with the clamp invariant.
pub fn apply_event(current: f64, event: ReliabilityEvent) -> f64 {
    (current + event.delta()).clamp(RELIABILITY_MIN, RELIABILITY_MAX)
}

/// Display buckets for a reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReliabilityLevel {
    BuildingTrust,
    Standard,
    RisingStar,
    Reliable,
    Elite,
}

impl ReliabilityLevel {
    pub fn for_score(score: f64) -> Self {
        if score >= 4.0 {
            ReliabilityLevel::Elite
        } else if score >= 3.0 {
            ReliabilityLevel::Reliable
        } else if score >= 2.0 {
            ReliabilityLevel::RisingStar
        } else if score >= 1.2 {
            ReliabilityLevel::Standard
        } else {
            ReliabilityLevel::BuildingTrust
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReliabilityLevel::Elite => "Elite",
            ReliabilityLevel::Reliable => "Reliable",
            ReliabilityLevel::RisingStar => "Rising Star",
            ReliabilityLevel::Standard => "Standard",
            ReliabilityLevel::BuildingTrust => "Building Trust",
        }
    }
}

/// The level reached if this score change crossed a bucket boundary upward.
/// Downward and same-bucket moves return None; only upward crossings earn a
/// milestone notification.
pub fn milestone_crossed(before: f64, after: f64) -> Option<ReliabilityLevel> {
    let from = ReliabilityLevel::for_score(before);
    let to = ReliabilityLevel::for_score(after);
    (to > from).then_some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_table() {
        assert_eq!(ReliabilityEvent::CollaborationCompleted.delta(), 0.05);
        assert_eq!(ReliabilityEvent::PositiveFeedback.delta(), 0.02);
        assert_eq!(ReliabilityEvent::CollaborationCancelled.delta(), -0.10);
        assert_eq!(ReliabilityEvent::DeclinedInvite.delta(), -0.03);
        assert_eq!(ReliabilityEvent::RejectedApplication.delta(), -0.01);
    }

    #[test]
    fn test_repeated_completions_never_exceed_max() {
        let mut score = 4.9;
        for _ in 0..50 {
            score = apply_event(score, ReliabilityEvent::CollaborationCompleted);
            assert!(score <= RELIABILITY_MAX);
        }
        assert_eq!(score, RELIABILITY_MAX);
    }

    #[test]
    fn test_repeated_cancellations_never_drop_below_min() {
        let mut score = 1.0;
        for _ in 0..50 {
            score = apply_event(score, ReliabilityEvent::CollaborationCancelled);
            assert!(score >= RELIABILITY_MIN);
        }
        assert_eq!(score, RELIABILITY_MIN);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(ReliabilityLevel::for_score(5.0), ReliabilityLevel::Elite);
        assert_eq!(ReliabilityLevel::for_score(4.0), ReliabilityLevel::Elite);
        assert_eq!(ReliabilityLevel::for_score(3.9), ReliabilityLevel::Reliable);
        assert_eq!(ReliabilityLevel::for_score(3.0), ReliabilityLevel::Reliable);
        assert_eq!(ReliabilityLevel::for_score(2.0), ReliabilityLevel::RisingStar);
        assert_eq!(ReliabilityLevel::for_score(1.2), ReliabilityLevel::Standard);
        assert_eq!(ReliabilityLevel::for_score(1.19), ReliabilityLevel::BuildingTrust);
        assert_eq!(ReliabilityLevel::for_score(0.5), ReliabilityLevel::BuildingTrust);
    }

    #[test]
    fn test_milestone_scenario_d() {
        // 1.18 + 0.05 = 1.23 crosses the 1.2 boundary upward
        let before = 1.18;
        let after = apply_event(before, ReliabilityEvent::CollaborationCompleted);
        assert!((after - 1.23).abs() < 1e-9);
        assert_eq!(milestone_crossed(before, after), Some(ReliabilityLevel::Standard));
    }

    #[test]
    fn test_no_milestone_on_same_bucket_or_downward_moves() {
        assert_eq!(milestone_crossed(3.1, 3.15), None);
        assert_eq!(milestone_crossed(3.0, 2.9), None);
        assert_eq!(milestone_crossed(2.05, 1.95), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReliabilityLevel::Elite.label(), "Elite");
        assert_eq!(ReliabilityLevel::BuildingTrust.label(), "Building Trust");
    }
}

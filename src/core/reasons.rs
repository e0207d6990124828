use crate::models::SubScores;

/// Maximum number of reasons attached to a match.
const MAX_REASONS: usize = 3;

/// Derive human-readable justifications from one candidate's own sub-scores.
///
/// Rules are evaluated in a fixed priority order and the first three that fire
/// are kept, so output is deterministic and independent of how other
/// candidates scored. If nothing fires, a single generic fallback is emitted.
pub fn generate_reasons(match_score: i64, scores: &SubScores) -> Vec<String> {
    let mut reasons = Vec::new();

    if match_score >= 85 {
        reasons.push("Highly relevant to your campaign goals".to_string());
    }
    if scores.niche > 90.0 {
        reasons.push("Expert in your target niche".to_string());
    }
    if scores.price >= 90.0 {
        reasons.push("Strong value within your budget".to_string());
    }
    if scores.reliability >= 110.0 {
        reasons.push("Elite trust rating from past collaborations".to_string());
    }
    if scores.location >= 90.0 {
        reasons.push("Based in your campaign area".to_string());
    }
    if scores.campaign_type >= 100.0 {
        reasons.push("Supports your requested promotion format".to_string());
    }
    if scores.intent >= 75.0 {
        reasons.push("Matches what you have been searching for".to_string());
    }
    if scores.personalization >= 80.0 {
        reasons.push("You have had positive interactions with this creator".to_string());
    }
    if scores.reliability < 85.0 {
        reasons.push("Still building a collaboration history".to_string());
    }

    reasons.truncate(MAX_REASONS);

    if reasons.is_empty() {
        reasons.push("Potential fit based on overall profile".to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_scores() -> SubScores {
        SubScores {
            engagement: 50.0,
            niche: 50.0,
            price: 50.0,
            location: 50.0,
            campaign_type: 50.0,
            reliability: 100.0,
            availability: 100.0,
            predicted_roi: 50.0,
            track_record: 50.0,
            insight: 50.0,
            intent: 50.0,
            personalization: 50.0,
        }
    }

    #[test]
    fn test_truncates_to_three_in_rule_order() {
        let scores = SubScores {
            niche: 95.0,
            price: 95.0,
            reliability: 120.0,
            location: 95.0,
            ..neutral_scores()
        };
        let reasons = generate_reasons(90, &scores);
        assert_eq!(reasons.len(), 3);
        assert_eq!(reasons[0], "Highly relevant to your campaign goals");
        assert_eq!(reasons[1], "Expert in your target niche");
        assert_eq!(reasons[2], "Strong value within your budget");
    }

    #[test]
    fn test_low_reliability_caveat() {
        let scores = SubScores {
            reliability: 70.0,
            ..neutral_scores()
        };
        let reasons = generate_reasons(50, &scores);
        assert!(reasons.contains(&"Still building a collaboration history".to_string()));
    }

    #[test]
    fn test_fallback_when_no_rule_fires() {
        let reasons = generate_reasons(50, &neutral_scores());
        assert_eq!(reasons, vec!["Potential fit based on overall profile".to_string()]);
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let scores = SubScores {
            niche: 95.0,
            intent: 80.0,
            ..neutral_scores()
        };
        assert_eq!(generate_reasons(70, &scores), generate_reasons(70, &scores));
    }
}

use chrono::{DateTime, Duration, Utc};

use crate::models::{LikelihoodLevel, OutreachRecord, OutreachStatus, ResponseLikelihood, UserActivity};

/// Days of login silence before a creator is considered inactive.
const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// How many recent outreach records the estimate looks at.
const OUTREACH_SAMPLE: usize = 20;

/// Minimum sample size for a meaningful response rate.
const MIN_SAMPLE: usize = 3;

/// Estimate how likely a creator is to respond to an invitation.
///
/// Inputs: last login plus the 20 most recent outreach records (assumed
/// most-recent-first, as the store returns them). `now` is injected so the
/// 30-day window is testable.
pub fn estimate(
    activity: &UserActivity,
    outreach: &[OutreachRecord],
    now: DateTime<Utc>,
) -> ResponseLikelihood {
    let recently_active = activity
        .last_login_at
        .map(|at| now - at <= Duration::days(ACTIVITY_WINDOW_DAYS))
        .unwrap_or(false);

    if !recently_active {
        return ResponseLikelihood {
            label: "Limited recent activity".to_string(),
            level: LikelihoodLevel::Low,
            description: "This creator has not been active in the last 30 days".to_string(),
        };
    }

    let sample: Vec<&OutreachRecord> = outreach.iter().take(OUTREACH_SAMPLE).collect();
    if sample.len() < MIN_SAMPLE {
        return ResponseLikelihood {
            label: "New to platform".to_string(),
            level: LikelihoodLevel::Neutral,
            description: "Not enough invitation history to estimate responsiveness".to_string(),
        };
    }

    let responded = sample
        .iter()
        .filter(|r| {
            r.responded_at.is_some()
                || matches!(r.status, OutreachStatus::Accepted | OutreachStatus::Rejected)
        })
        .count();
    let rate = responded as f64 / sample.len() as f64;

    if rate >= 0.70 {
        ResponseLikelihood {
            label: "Usually responds".to_string(),
            level: LikelihoodLevel::High,
            description: "Responded to most recent invitations".to_string(),
        }
    } else if rate >= 0.40 {
        ResponseLikelihood {
            label: "Responds sometimes".to_string(),
            level: LikelihoodLevel::Medium,
            description: "Responded to some recent invitations".to_string(),
        }
    } else {
        ResponseLikelihood {
            label: "Selective".to_string(),
            level: LikelihoodLevel::Low,
            description: "Rarely responds to invitations".to_string(),
        }
    }
}

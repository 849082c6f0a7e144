//! Control/treatment arm assignment.
//!
//! A closed-loop controller, not random assignment: the decision is
//! deterministic given the aggregate counts read at assignment time, and
//! self-corrects toward an even split as sessions accumulate.

use crate::personality::NEUTRAL_PERSONALITY;

/// Fraction of control sessions the balancer steers toward.
pub const TARGET_CONTROL_RATIO: f64 = 0.5;

/// Outcome of an arm assignment for a brand-new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub is_control: bool,
    /// Replacement system prompt when the session is forced to control.
    pub personality_override: Option<&'static str>,
}

/// Decide the arm for a new session from a fresh read of the aggregate
/// session counts.
///
/// The ratio is defined as 0 when no sessions exist, so the very first
/// session is always control. A ratio below the target forces control with
/// the neutral prompt; at or above the target the session is treatment and
/// keeps its questionnaire-derived personality.
pub fn decide(total_sessions: u64, control_sessions: u64) -> Assignment {
    let control_ratio = if total_sessions == 0 {
        0.0
    } else {
        control_sessions as f64 / total_sessions as f64
    };

    if control_ratio < TARGET_CONTROL_RATIO {
        Assignment {
            is_control: true,
            personality_override: Some(NEUTRAL_PERSONALITY),
        }
    } else {
        Assignment {
            is_control: false,
            personality_override: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_session_is_control_with_neutral_override() {
        let assignment = decide(0, 0);
        assert!(assignment.is_control);
        assert_eq!(assignment.personality_override, Some(NEUTRAL_PERSONALITY));
    }

    #[test]
    fn ratio_below_target_forces_control() {
        assert!(decide(10, 3).is_control);
    }

    #[test]
    fn ratio_at_or_above_target_is_treatment() {
        let at_target = decide(10, 5);
        assert!(!at_target.is_control);
        assert_eq!(at_target.personality_override, None);

        assert!(!decide(10, 6).is_control);
    }

    #[test]
    fn repeated_decisions_converge_toward_an_even_split() {
        let mut total = 0u64;
        let mut control = 0u64;
        for _ in 0..100 {
            if decide(total, control).is_control {
                control += 1;
            }
            total += 1;
        }
        let ratio = control as f64 / total as f64;
        assert!((ratio - TARGET_CONTROL_RATIO).abs() <= 0.05, "ratio was {}", ratio);
    }
}

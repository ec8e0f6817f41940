//! Outcome classification.
//!
//! Maps a percentage change to a categorical [`Outcome`] and a signed score
//! in [-1, 1]. The thresholds and slopes are fixed so historical scores stay
//! reproducible across releases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Change (in percent) at or above which an observation counts as a win.
pub const WIN_THRESHOLD: f64 = 2.0;

/// Change (in percent) at or below which an observation counts as a loss.
pub const LOSS_THRESHOLD: f64 = -2.0;

/// Percent of additional move that takes a score from ±0.5 to ±1.5 before clamping.
const SCORE_SPAN: f64 = 16.0;

/// Divisor mapping the neutral band onto (-0.2, 0.2).
const NEUTRAL_DIVISOR: f64 = 10.0;

/// Categorical result of comparing an observation to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Neutral,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "neutral" => Ok(Self::Neutral),
            other => Err(format!("unknown outcome '{other}'")),
        }
    }
}

/// Label and score for a single change value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub outcome: Outcome,
    pub score: f64,
}

/// Classify a percentage change.
///
/// # Examples
///
/// ```
/// use hindsight::domain::outcome::{classify, Outcome};
///
/// let c = classify(3.5);
/// assert_eq!(c.outcome, Outcome::Win);
/// assert!((c.score - 0.59375).abs() < 1e-12);
/// ```
#[must_use]
pub fn classify(change_pct: f64) -> Classification {
    if change_pct >= WIN_THRESHOLD {
        Classification {
            outcome: Outcome::Win,
            score: (0.5 + (change_pct - WIN_THRESHOLD) / SCORE_SPAN).min(1.0),
        }
    } else if change_pct <= LOSS_THRESHOLD {
        Classification {
            outcome: Outcome::Loss,
            score: (-0.5 + (change_pct - LOSS_THRESHOLD) / SCORE_SPAN).max(-1.0),
        }
    } else {
        Classification {
            outcome: Outcome::Neutral,
            score: change_pct / NEUTRAL_DIVISOR,
        }
    }
}

/// Percentage change from `baseline` to `observed`.
///
/// Callers guarantee `baseline > 0`.
#[must_use]
pub fn change_pct(baseline: f64, observed: f64) -> f64 {
    (observed - baseline) / baseline * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn win_threshold_is_inclusive() {
        let c = classify(2.0);
        assert_eq!(c.outcome, Outcome::Win);
        assert_eq!(c.score, 0.5);
    }

    #[test]
    fn loss_threshold_is_inclusive() {
        let c = classify(-2.0);
        assert_eq!(c.outcome, Outcome::Loss);
        assert_eq!(c.score, -0.5);
    }

    #[test]
    fn loss_at_minus_six_scores_three_quarters() {
        let c = classify(-6.0);
        assert_eq!(c.outcome, Outcome::Loss);
        assert_eq!(c.score, -0.75);
    }

    #[test]
    fn large_moves_saturate() {
        assert_eq!(classify(18.0).score, 1.0);
        assert_eq!(classify(250.0).score, 1.0);
        assert_eq!(classify(-18.0).score, -1.0);
        assert_eq!(classify(-99.0).score, -1.0);
    }

    #[test]
    fn change_pct_from_baseline() {
        assert!((change_pct(100.0, 103.5) - 3.5).abs() < 1e-9);
        assert!((change_pct(50.0, 47.0) + 6.0).abs() < 1e-9);
    }

    #[test]
    fn outcome_string_round_trip() {
        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Neutral] {
            assert_eq!(outcome.as_str().parse::<Outcome>().unwrap(), outcome);
        }
        assert!("draw".parse::<Outcome>().is_err());
    }

    proptest! {
        #[test]
        fn wins_score_between_half_and_one(change in 2.0f64..1000.0) {
            let c = classify(change);
            prop_assert_eq!(c.outcome, Outcome::Win);
            prop_assert!((0.5..=1.0).contains(&c.score));
        }

        #[test]
        fn losses_score_between_minus_one_and_minus_half(change in -1000.0f64..=-2.0) {
            let c = classify(change);
            prop_assert_eq!(c.outcome, Outcome::Loss);
            prop_assert!((-1.0..=-0.5).contains(&c.score));
        }

        #[test]
        fn neutral_band_scores_change_over_ten(change in -1.999f64..1.999) {
            let c = classify(change);
            prop_assert_eq!(c.outcome, Outcome::Neutral);
            prop_assert_eq!(c.score, change / 10.0);
        }

        #[test]
        fn win_scores_are_monotone(a in 2.0f64..40.0, b in 2.0f64..40.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(lo).score <= classify(hi).score);
        }

        #[test]
        fn scores_are_symmetric(change in 2.0f64..40.0) {
            prop_assert_eq!(classify(change).score, -classify(-change).score);
        }

        #[test]
        fn classification_is_pure(change in -50.0f64..50.0) {
            prop_assert_eq!(classify(change), classify(change));
        }
    }
}

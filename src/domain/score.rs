//! Composite scores derived from per-horizon observations.
//!
//! Two composites are maintained on each tracked event:
//!
//! - **Momentum**: an early directional estimate from the 15m and 30m
//!   changes, with a bonus for strong 30m moves and a penalty when an early
//!   pop reverses.
//! - **Final**: a horizon-weighted blend of every observed score, renormalized
//!   over the subset that has been observed so far.
//!
//! # Examples
//!
//! ```
//! use hindsight::domain::score::momentum;
//!
//! // 3.5% at 30m: 0.7 from the slope plus the strong-move bonus.
//! assert!((momentum(None, 3.5) - 0.9).abs() < 1e-9);
//! ```

use super::horizon::Horizon;
use super::outcome::Outcome;

/// 30m change (percent) that maps to full momentum before bonuses.
const MOMENTUM_SCALE: f64 = 5.0;
/// 30m change above which momentum gets a bonus.
const STRONG_MOVE_PCT: f64 = 3.0;
const STRONG_MOVE_BONUS: f64 = 0.2;
/// 15m change above which a negative 30m counts as a reversal.
const EARLY_POP_PCT: f64 = 1.0;
const REVERSAL_PENALTY: f64 = 0.3;

/// Final score beyond which the blend alone decides the outcome.
const FINAL_SCORE_CUTOFF: f64 = 0.2;
/// Individually decided horizons needed to force the final outcome.
const MAJORITY_HORIZONS: usize = 3;

/// Momentum from the 15m and 30m changes.
///
/// A missing 15m change disables the reversal penalty.
#[must_use]
pub fn momentum(change_15m: Option<f64>, change_30m: f64) -> f64 {
    let mut score = (change_30m / MOMENTUM_SCALE).clamp(-1.0, 1.0);

    if change_30m > STRONG_MOVE_PCT {
        score += STRONG_MOVE_BONUS;
    }
    if change_15m.is_some_and(|c15| c15 > EARLY_POP_PCT) && change_30m < 0.0 {
        score -= REVERSAL_PENALTY;
    }

    score.clamp(-1.0, 1.0)
}

/// Blended final outcome over observed horizons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalScore {
    pub outcome: Outcome,
    pub score: f64,
}

/// Blend per-horizon `(horizon, outcome, score)` triples into a final score.
///
/// Horizons without a weight are ignored. Returns `None` when no weighted
/// horizon has been observed.
#[must_use]
pub fn final_score<I>(observations: I) -> Option<FinalScore>
where
    I: IntoIterator<Item = (Horizon, Outcome, f64)>,
{
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    let mut wins = 0;
    let mut losses = 0;

    for (horizon, outcome, score) in observations {
        let Some(weight) = horizon.weight() else {
            continue;
        };
        weighted += score * weight;
        total_weight += weight;
        match outcome {
            Outcome::Win => wins += 1,
            Outcome::Loss => losses += 1,
            Outcome::Neutral => {}
        }
    }

    if total_weight <= 0.0 {
        return None;
    }

    let score = weighted / total_weight;
    let outcome = if wins >= MAJORITY_HORIZONS || score > FINAL_SCORE_CUTOFF {
        Outcome::Win
    } else if losses >= MAJORITY_HORIZONS || score < -FINAL_SCORE_CUTOFF {
        Outcome::Loss
    } else {
        Outcome::Neutral
    };

    Some(FinalScore { outcome, score })
}

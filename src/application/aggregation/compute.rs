//! Pure aggregation over loaded events.
//!
//! Every function here takes an already filtered window of events and never
//! touches storage, so the rules can be tested without a database.

use std::collections::BTreeMap;

use chrono::Timelike;

use crate::domain::error::ValidationError;
use crate::domain::event::TrackedEvent;
use crate::domain::horizon::Horizon;
use crate::domain::outcome::Outcome;
use crate::domain::stats::{
    CalibrationBucket, ExitReasonStats, HoldDurationBucket, HorizonSnapshot, HourOfDayStats,
    OutcomeStats, RecentOutcome,
};

/// Lowest confidence considered by calibration.
pub const CALIBRATION_FLOOR: f64 = 0.5;

/// Horizons carried by [`RecentOutcome`].
pub const RECENT_HORIZONS: [Horizon; 3] = [Horizon::M30, Horizon::H1, Horizon::D1];

/// Hold-duration bucket edges in hours; the last bucket is open-ended.
const HOLD_BUCKETS: [(&str, f64, Option<f64>); 9] = [
    ("<15m", 0.0, Some(0.25)),
    ("15-30m", 0.25, Some(0.5)),
    ("30m-1h", 0.5, Some(1.0)),
    ("1-4h", 1.0, Some(4.0)),
    ("4-8h", 4.0, Some(8.0)),
    ("8-24h", 8.0, Some(24.0)),
    ("1-3d", 24.0, Some(72.0)),
    ("3-7d", 72.0, Some(168.0)),
    (">7d", 168.0, None),
];

/// Absorbs representation error when dividing confidences into buckets.
const BUCKET_EPSILON: f64 = 1e-9;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 2)
}

fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// One sampled `(outcome, change, score, momentum)` tuple.
type Sample = (Outcome, f64, f64, Option<f64>);

fn summarize(samples: &[Sample]) -> Option<OutcomeStats> {
    if samples.is_empty() {
        return None;
    }
    let count = |o: Outcome| samples.iter().filter(|s| s.0 == o).count();
    let wins = count(Outcome::Win);

    Some(OutcomeStats {
        sample_size: samples.len(),
        wins,
        losses: count(Outcome::Loss),
        neutrals: count(Outcome::Neutral),
        win_rate: percent(wins, samples.len()),
        avg_change: mean(samples.iter().map(|s| s.1)).unwrap_or_default(),
        avg_score: mean(samples.iter().map(|s| s.2)).unwrap_or_default(),
        avg_momentum: mean(samples.iter().filter_map(|s| s.3)),
    })
}

/// Outcome statistics at one horizon, over events that have it observed.
#[must_use]
pub fn horizon_stats(events: &[TrackedEvent], horizon: Horizon) -> Option<OutcomeStats> {
    let samples: Vec<Sample> = events
        .iter()
        .filter_map(|e| {
            e.observation(horizon)
                .map(|o| (o.outcome, o.change_pct, o.score, e.momentum_score))
        })
        .collect();
    summarize(&samples)
}

/// Outcome statistics keyed on the final blend.
///
/// Average change is taken from the 1d horizon.
#[must_use]
pub fn final_stats(events: &[TrackedEvent]) -> Option<OutcomeStats> {
    let samples: Vec<Sample> = events
        .iter()
        .filter_map(|e| {
            let outcome = e.final_outcome?;
            let score = e.final_score?;
            let change = e.observation(Horizon::FINAL)?.change_pct;
            Some((outcome, change, score, e.momentum_score))
        })
        .collect();
    summarize(&samples)
}

fn format_bound(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0');
    if let Some(stripped) = text.strip_suffix('.') {
        format!("{stripped}.0")
    } else {
        text.to_string()
    }
}

/// Compare stated confidence to observed direction accuracy.
///
/// Buckets span `[0.5, 1.0]` in steps of `width`. Events below 0.5 or
/// missing either annotation are skipped; a confidence of exactly 1.0 lands
/// in the top bucket. Empty buckets are omitted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidBucketWidth`] unless
/// `0 < width <= 0.5`.
pub fn calibration(
    events: &[TrackedEvent],
    width: f64,
) -> Result<Vec<CalibrationBucket>, ValidationError> {
    if !width.is_finite() || width <= 0.0 || width > 1.0 - CALIBRATION_FLOOR {
        return Err(ValidationError::InvalidBucketWidth { value: width });
    }

    // Casts saturate; only occupied buckets are stored.
    let bucket_count = (((1.0 - CALIBRATION_FLOOR) / width) - BUCKET_EPSILON).ceil() as usize;
    let mut tallies: BTreeMap<usize, (usize, usize)> = BTreeMap::new();

    for event in events {
        let (Some(confidence), Some(correct)) = (event.confidence, event.direction_correct) else {
            continue;
        };
        if !(CALIBRATION_FLOOR..=1.0).contains(&confidence) {
            continue;
        }
        let index = (((confidence - CALIBRATION_FLOOR) / width) + BUCKET_EPSILON).floor() as usize;
        let tally = tallies
            .entry(index.min(bucket_count.saturating_sub(1)))
            .or_default();
        tally.0 += 1;
        if correct {
            tally.1 += 1;
        }
    }

    Ok(tallies
        .into_iter()
        .map(|(index, (predictions, correct))| {
            let lower = round_to(CALIBRATION_FLOOR + index as f64 * width, 6);
            let upper = round_to((lower + width).min(1.0), 6);
            let actual_accuracy = percent(correct, predictions);
            let expected_accuracy = round_to((lower + upper) / 2.0 * 100.0, 2);
            CalibrationBucket {
                range: format!("{}-{}", format_bound(lower), format_bound(upper)),
                lower,
                upper,
                predictions,
                correct,
                actual_accuracy,
                expected_accuracy,
                calibration_error: round_to((actual_accuracy - expected_accuracy).abs(), 2),
            }
        })
        .collect())
}

/// Trade results per exit reason, most frequent first.
#[must_use]
pub fn exit_breakdown(events: &[TrackedEvent]) -> Vec<ExitReasonStats> {
    let mut groups: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for event in events {
        if let Some(exit) = &event.exit {
            groups
                .entry(exit.reason.as_str())
                .or_default()
                .push((exit.pnl_pct, exit.hold_duration_hours));
        }
    }

    let mut stats: Vec<ExitReasonStats> = groups
        .into_iter()
        .map(|(reason, trades)| {
            let wins = trades.iter().filter(|(pnl, _)| *pnl > 0.0).count();
            ExitReasonStats {
                reason: reason.to_string(),
                count: trades.len(),
                win_rate: percent(wins, trades.len()),
                avg_pnl: mean(trades.iter().map(|t| t.0)).unwrap_or_default(),
                avg_hold_hours: mean(trades.iter().map(|t| t.1)).unwrap_or_default(),
                best: trades.iter().map(|t| t.0).fold(f64::NEG_INFINITY, f64::max),
                worst: trades.iter().map(|t| t.0).fold(f64::INFINITY, f64::min),
            }
        })
        .collect();

    // Stable sort keeps reasons alphabetical within equal counts.
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Trades bucketed by hold duration. Every bucket is reported.
#[must_use]
pub fn hold_distribution(events: &[TrackedEvent]) -> Vec<HoldDurationBucket> {
    HOLD_BUCKETS
        .iter()
        .map(|&(label, lower, upper)| {
            let trades: Vec<f64> = events
                .iter()
                .filter_map(|e| e.exit.as_ref())
                .filter(|x| {
                    x.hold_duration_hours >= lower
                        && upper.map_or(true, |u| x.hold_duration_hours < u)
                })
                .map(|x| x.pnl_pct)
                .collect();
            HoldDurationBucket {
                label,
                lower_hours: lower,
                upper_hours: upper,
                count: trades.len(),
                wins: trades.iter().filter(|p| **p > 0.0).count(),
                avg_pnl: mean(trades.iter().copied()).unwrap_or_default(),
            }
        })
        .collect()
}

/// Outcomes at `horizon` grouped by the UTC hour of the baseline.
#[must_use]
pub fn hour_of_day(events: &[TrackedEvent], horizon: Horizon) -> Vec<HourOfDayStats> {
    let mut hours: BTreeMap<u32, Vec<(Outcome, f64)>> = BTreeMap::new();
    for event in events {
        if let Some(obs) = event.observation(horizon) {
            hours
                .entry(event.baseline_at.hour())
                .or_default()
                .push((obs.outcome, obs.score));
        }
    }

    hours
        .into_iter()
        .map(|(hour, samples)| {
            let wins = samples.iter().filter(|s| s.0 == Outcome::Win).count();
            HourOfDayStats {
                hour,
                sample_size: samples.len(),
                wins,
                win_rate: percent(wins, samples.len()),
                avg_score: mean(samples.iter().map(|s| s.1)).unwrap_or_default(),
            }
        })
        .collect()
}

impl From<&TrackedEvent> for RecentOutcome {
    fn from(event: &TrackedEvent) -> Self {
        let horizons = RECENT_HORIZONS
            .iter()
            .filter_map(|h| {
                event.observation(*h).map(|o| HorizonSnapshot {
                    horizon: *h,
                    change_pct: o.change_pct,
                    outcome: o.outcome,
                    score: o.score,
                })
            })
            .collect();

        Self {
            id: event.id.clone(),
            ticker: event.ticker.clone(),
            category: event.category.clone(),
            source: event.source.clone(),
            label: event.label.clone(),
            baseline_value: event.baseline_value,
            baseline_at: event.baseline_at,
            horizons,
            momentum_score: event.momentum_score,
            final_outcome: event.final_outcome,
            final_score: event.final_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{HorizonObservation, TradeExit};
    use crate::testkit::domain::tracked;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn annotated(confidence: f64, correct: bool) -> TrackedEvent {
        let mut event = tracked("AAPL", 100.0);
        event.confidence = Some(confidence);
        event.direction_correct = Some(correct);
        event
    }

    fn exited(reason: &str, pnl: f64, hours: f64) -> TrackedEvent {
        let mut event = tracked("AAPL", 100.0);
        event.exit = Some(TradeExit {
            reason: reason.into(),
            pnl_pct: pnl,
            hold_duration_hours: hours,
        });
        event
    }

    #[test]
    fn calibration_bucket_matches_worked_example() {
        let events: Vec<TrackedEvent> = (0..10).map(|i| annotated(0.85, i < 7)).collect();
        let buckets = calibration(&events, 0.1).unwrap();

        assert_eq!(buckets.len(), 1);
        let bucket = &buckets[0];
        assert_eq!(bucket.range, "0.8-0.9");
        assert_eq!(bucket.predictions, 10);
        assert_eq!(bucket.correct, 7);
        assert_eq!(bucket.actual_accuracy, 70.0);
        assert_eq!(bucket.expected_accuracy, 85.0);
        assert_eq!(bucket.calibration_error, 15.0);
    }

    #[test]
    fn calibration_edges() {
        let events = vec![
            annotated(0.8, true),
            annotated(1.0, true),
            annotated(0.49, false),
            annotated(0.5, false),
        ];
        let buckets = calibration(&events, 0.1).unwrap();
        let ranges: Vec<&str> = buckets.iter().map(|b| b.range.as_str()).collect();
        assert_eq!(ranges, vec!["0.5-0.6", "0.8-0.9", "0.9-1.0"]);
        assert_eq!(buckets.iter().map(|b| b.predictions).sum::<usize>(), 3);
    }

    #[test]
    fn calibration_rejects_bad_width() {
        for width in [0.0, -0.1, 0.6, f64::NAN] {
            assert!(calibration(&[], width).is_err());
        }
        assert!(calibration(&[], 0.5).unwrap().is_empty());
    }

    #[test]
    fn calibration_tiny_width_allocates_only_occupied_buckets() {
        let events = vec![annotated(0.75, true), annotated(0.75, false)];
        for width in [1e-300, f64::MIN_POSITIVE, 1e-9] {
            let buckets = calibration(&events, width).unwrap();
            assert_eq!(buckets.len(), 1);
            assert_eq!(buckets[0].predictions, 2);
            assert_eq!(buckets[0].correct, 1);
        }
        assert!(calibration(&[], 1e-300).unwrap().is_empty());
    }

    #[test]
    fn exits_sorted_by_count() {
        let events = vec![
            exited("stop_loss", -2.0, 1.0),
            exited("take_profit", 3.0, 2.0),
            exited("take_profit", 5.0, 4.0),
            exited("take_profit", -1.0, 3.0),
        ];
        let stats = exit_breakdown(&events);
        assert_eq!(stats[0].reason, "take_profit");
        assert_eq!(stats[0].count, 3);
        assert_relative_eq!(stats[0].win_rate, 66.67);
        assert_relative_eq!(stats[0].avg_pnl, 7.0 / 3.0, epsilon = 1e-9);
        assert_eq!(stats[0].best, 5.0);
        assert_eq!(stats[0].worst, -1.0);
        assert_relative_eq!(stats[0].avg_hold_hours, 3.0);
        assert_eq!(stats[1].reason, "stop_loss");
    }

    #[test]
    fn hold_buckets_are_half_open_and_complete() {
        let events = vec![
            exited("x", 1.0, 0.0),
            exited("x", 1.0, 0.25),
            exited("x", -1.0, 24.0),
            exited("x", 2.0, 500.0),
        ];
        let buckets = hold_distribution(&events);
        assert_eq!(buckets.len(), 9);
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0, 0, 1, 0, 1]);
        assert_eq!(buckets[6].label, "1-3d");
        assert_eq!(buckets[6].wins, 0);
        assert!(buckets[8].upper_hours.is_none());
    }

    #[test]
    fn horizon_stats_sample_only_observed() {
        let mut win = tracked("AAPL", 100.0);
        win.apply(Horizon::M30, HorizonObservation::measure(100.0, 103.5));
        let mut loss = tracked("AAPL", 100.0);
        loss.apply(Horizon::M30, HorizonObservation::measure(100.0, 96.0));
        let pending = tracked("AAPL", 100.0);

        let stats = horizon_stats(&[win, loss, pending], Horizon::M30).unwrap();
        assert_eq!(stats.sample_size, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, 50.0);
        assert_relative_eq!(stats.avg_change, -0.25, epsilon = 1e-9);
        assert!(stats.avg_momentum.is_some());
        assert!(horizon_stats(&[], Horizon::M30).is_none());
    }

    #[test]
    fn final_stats_use_one_day_change() {
        let mut event = tracked("TSLA", 50.0);
        event.apply(Horizon::D1, HorizonObservation::measure(50.0, 47.0));
        let stats = final_stats(&[event]).unwrap();
        assert_eq!(stats.losses, 1);
        assert_relative_eq!(stats.avg_change, -6.0, epsilon = 1e-9);
        assert_relative_eq!(stats.avg_score, -0.75, epsilon = 1e-9);
        assert!(stats.avg_momentum.is_none());
    }

    #[test]
    fn hours_group_by_baseline_hour() {
        let mut morning = tracked("AAPL", 100.0);
        morning.baseline_at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 5, 0).unwrap();
        morning.apply(Horizon::H1, HorizonObservation::measure(100.0, 103.0));
        let mut late = tracked("AAPL", 100.0);
        late.baseline_at = Utc.with_ymd_and_hms(2026, 3, 2, 19, 55, 0).unwrap();
        late.apply(Horizon::H1, HorizonObservation::measure(100.0, 100.5));

        let hours = hour_of_day(&[late, morning], Horizon::H1);
        assert_eq!(hours.iter().map(|h| h.hour).collect::<Vec<_>>(), vec![14, 19]);
        assert_eq!(hours[0].win_rate, 100.0);
        assert_eq!(hours[1].wins, 0);
    }

    #[test]
    fn recent_outcome_keeps_key_horizons() {
        let mut event = tracked("AAPL", 100.0);
        event.apply(Horizon::M15, HorizonObservation::measure(100.0, 101.0));
        event.apply(Horizon::M30, HorizonObservation::measure(100.0, 103.5));
        let recent = RecentOutcome::from(&event);
        assert_eq!(recent.horizons.len(), 1);
        assert_eq!(recent.horizons[0].horizon, Horizon::M30);
        assert_eq!(recent.momentum_score, event.momentum_score);
    }
}

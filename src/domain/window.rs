//! Lookback window arithmetic.
//!
//! Windows are user-supplied and may reach past the representable date
//! range; the start then saturates at the earliest instant instead of
//! overflowing.

use chrono::{DateTime, Duration, Utc};

/// `now - span`, saturating at [`DateTime::<Utc>::MIN_UTC`].
#[must_use]
pub fn saturating_sub(now: DateTime<Utc>, span: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(span)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Start of a lookback window covering the last `days` days.
#[must_use]
pub fn lookback_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    match Duration::try_days(i64::from(days)) {
        Some(span) => saturating_sub(now, span),
        None => DateTime::<Utc>::MIN_UTC,
    }
}

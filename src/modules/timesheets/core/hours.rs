use chrono::NaiveTime;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Rounds to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hours from `start` to `end` on the same day, rounded to two decimals.
///
/// An `end` before `start` yields a negative value; no midnight wrap is applied.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let seconds = (end - start).num_seconds() as f64;
    round2(seconds / SECONDS_PER_HOUR)
}

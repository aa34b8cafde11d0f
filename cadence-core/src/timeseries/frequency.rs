use serde::{Deserialize, Serialize};

use crate::timeseries::interval::{Interval, pairwise_intervals, pairwise_intervals_iso};
use crate::{CadenceError, Instant, TimePeriod};

/// "`amount` occurrences per `time_period`".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyResult {
    /// Mean occurrences per period.
    pub amount: f64,
    /// Granularity the amount is expressed in.
    pub time_period: TimePeriod,
}

impl Default for FrequencyResult {
    /// Nothing happened, reported per year.
    fn default() -> Self {
        Self {
            amount: 0.0,
            time_period: TimePeriod::Year,
        }
    }
}

impl FrequencyResult {
    /// Convert to occurrences per second. See [`to_hertz`].
    #[must_use]
    pub fn to_hertz(&self) -> f64 {
        to_hertz(self)
    }
}

fn reciprocal_mean_period(intervals: &[Interval]) -> f64 {
    if intervals.is_empty() {
        return 0.0;
    }
    let total: f64 = intervals.iter().map(Interval::as_seconds).sum();
    #[allow(clippy::cast_precision_loss)]
    let average_period = total / intervals.len() as f64;
    // frequency is the inverse of the mean period, not the mean of per-pair frequencies
    1.0 / average_period
}

/// Average event frequency in Hertz.
///
/// Returns `0.0` for zero or one timestamp; otherwise the reciprocal of the
/// mean gap between consecutive timestamps, in seconds.
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` if the timestamps are not strictly
/// increasing.
///
/// ```
/// use cadence_core::{average_frequency, parse_instant};
/// let ts = [
///     parse_instant("2020-06-01T14:00:00Z").unwrap(),
///     parse_instant("2020-06-01T18:00:00Z").unwrap(),
/// ];
/// let hz = average_frequency(&ts).unwrap();
/// assert!((hz - 1.0 / 14_400.0).abs() < 1e-15);
/// ```
pub fn average_frequency(timestamps: &[Instant]) -> Result<f64, CadenceError> {
    if timestamps.len() <= 1 {
        return Ok(0.0);
    }
    Ok(reciprocal_mean_period(&pairwise_intervals(timestamps)?))
}

/// Textual variant of [`average_frequency`] for RFC 3339 timestamps.
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` if a timestamp cannot be parsed or
/// the sequence is not strictly increasing.
pub fn average_frequency_iso<S: AsRef<str>>(timestamps: &[S]) -> Result<f64, CadenceError> {
    if timestamps.len() <= 1 {
        return Ok(0.0);
    }
    Ok(reciprocal_mean_period(&pairwise_intervals_iso(timestamps)?))
}

/// Count timestamps per bin after splitting `window` into `time_period` bins.
///
/// Bins follow the same splitting rule as sample points (the last bin may be
/// partial). A timestamp on a bin edge belongs to the later bin, because bins
/// are `[start, end)`. Timestamps need not be sorted.
#[must_use]
pub fn count_per_bin(timestamps: &[Instant], window: &Interval, time_period: TimePeriod) -> Vec<usize> {
    window
        .split_by(time_period.as_duration())
        .iter()
        .map(|bin| timestamps.iter().filter(|&&t| bin.contains(t)).count())
        .collect()
}

/// Arithmetic mean of [`count_per_bin`]; `0.0` when there are no bins.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_frequency_per_time_period(
    timestamps: &[Instant],
    window: &Interval,
    time_period: TimePeriod,
) -> f64 {
    let counts = count_per_bin(timestamps, window, time_period);
    if counts.is_empty() {
        return 0.0;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Median of [`count_per_bin`]; the two middle values are averaged for an
/// even number of bins. `0.0` when there are no bins.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn median_frequency_per_time_period(
    timestamps: &[Instant],
    window: &Interval,
    time_period: TimePeriod,
) -> f64 {
    let mut counts = count_per_bin(timestamps, window, time_period);
    if counts.is_empty() {
        return 0.0;
    }
    counts.sort_unstable();
    let mid = counts.len() / 2;
    if counts.len() % 2 == 1 {
        counts[mid] as f64
    } else {
        (counts[mid - 1] + counts[mid]) as f64 / 2.0
    }
}

/// Finest granularity whose mean bin count reaches at least one event.
///
/// Candidates are scanned in [`TimePeriod::ALL`] order (hour → year); the
/// first with a mean of `>= 1` wins. When none qualifies the result is
/// `{ amount: 0, time_period: Year }`.
#[must_use]
pub fn best_mean_frequency(timestamps: &[Instant], window: &Interval) -> FrequencyResult {
    for time_period in TimePeriod::ALL {
        let amount = mean_frequency_per_time_period(timestamps, window, time_period);
        if amount >= 1.0 {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "cadence_core::frequency",
                %time_period,
                amount,
                window_end = %window.end(),
                "selected granularity"
            );
            return FrequencyResult {
                amount,
                time_period,
            };
        }
    }
    FrequencyResult::default()
}

/// Express a frequency in Hertz using the fixed calendar table.
///
/// ```
/// use cadence_core::{to_hertz, FrequencyResult, TimePeriod};
/// let per_week = FrequencyResult { amount: 1.0, time_period: TimePeriod::Week };
/// assert!((to_hertz(&per_week) - 1.0 / 604_800.0).abs() < 1e-18);
/// ```
#[must_use]
pub fn to_hertz(frequency: &FrequencyResult) -> f64 {
    frequency.amount / f64::from(frequency.time_period.seconds())
}

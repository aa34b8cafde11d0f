use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{CadenceError, DurationSpec, Instant};

/// A non-empty span `[start, end)` on the UTC timeline.
///
/// Construction rejects `end <= start`; a zero-length interval is an error,
/// not an empty value. Containment is closed at the start and open at the
/// end, so consecutive intervals produced by [`split_range`] never both
/// claim an instant that lands exactly on their shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Build an interval, rejecting `end <= start`.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidInterval` when `end` is not strictly after `start`.
    ///
    /// ```
    /// use cadence_core::Interval;
    /// use chrono::DateTime;
    /// let t1 = DateTime::from_timestamp(100, 0).unwrap();
    /// let t2 = DateTime::from_timestamp(200, 0).unwrap();
    /// assert!(Interval::new(t1, t2).is_ok());
    /// assert!(Interval::new(t2, t1).is_err());
    /// assert!(Interval::new(t1, t1).is_err());
    /// ```
    pub fn new(start: Instant, end: Instant) -> Result<Self, CadenceError> {
        if end <= start {
            return Err(CadenceError::invalid_interval(format!(
                "the end of an interval must be after its start (start={start}, end={end})"
            )));
        }
        Ok(Self { start, end })
    }

    // Callers guarantee `start < end`.
    pub(crate) const fn from_ordered(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Inclusive start.
    #[must_use]
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Exclusive end.
    #[must_use]
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// End of the interval in epoch milliseconds.
    #[must_use]
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// `start <= t < end`.
    #[must_use]
    pub fn contains(&self, t: Instant) -> bool {
        self.start <= t && t < self.end
    }

    /// Length as a signed time delta (always positive).
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Length in milliseconds.
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.duration().num_milliseconds()
    }

    /// Length in (fractional) seconds, down to the nanosecond.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_seconds(&self) -> f64 {
        let d = self.duration();
        d.num_seconds() as f64 + f64::from(d.subsec_nanos()) / 1e9
    }

    /// Split this interval into consecutive pieces of length `step`.
    ///
    /// See [`split_range`].
    #[must_use]
    pub fn split_by(&self, step: DurationSpec) -> Vec<Self> {
        split_range(self.start, self.end, step)
    }
}

/// Partition `[start, end)` into consecutive sub-intervals of length `step`.
///
/// Piece `k` (1-based) spans `[start + (k-1)·step, min(start + k·step, end))`,
/// so the final piece is shortened to whatever remains. Multiples are taken
/// from `start` to keep calendar-month steps from drifting.
///
/// Returns an empty vector when `end <= start` or `step` is zero. A `step`
/// longer than the range yields exactly one piece spanning the range.
#[must_use]
pub fn split_range(start: Instant, end: Instant, step: DurationSpec) -> Vec<Interval> {
    let mut out = Vec::new();
    if end <= start || step.is_zero() {
        return out;
    }

    let mut cur = start;
    let mut k: u32 = 1;
    while cur < end {
        let next = match step.checked_add_times(start, k) {
            Some(t) if t < end => t,
            _ => end,
        };
        if next <= cur {
            break;
        }
        out.push(Interval::from_ordered(cur, next));
        cur = next;
        let Some(k_next) = k.checked_add(1) else {
            break;
        };
        k = k_next;
    }
    out
}

/// Parse an RFC 3339 / ISO-8601 instant into UTC.
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` if the text is not a valid instant.
pub fn parse_instant(s: &str) -> Result<Instant, CadenceError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CadenceError::invalid_interval(format!("unparsable instant {s:?}: {e}")))
}

/// One interval per consecutive pair `(instants[i-1], instants[i])`.
///
/// Inputs of length 0 or 1 produce no intervals. Pairs are checked in order
/// and the first non-increasing pair fails the whole call.
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` if some `instants[i] <= instants[i-1]`.
///
/// ```
/// use cadence_core::pairwise_intervals;
/// use chrono::DateTime;
/// let ts: Vec<_> = [0, 60, 180].iter().map(|&s| DateTime::from_timestamp(s, 0).unwrap()).collect();
/// let iv = pairwise_intervals(&ts).unwrap();
/// assert_eq!(iv.len(), 2);
/// assert_eq!(iv[1].as_seconds(), 120.0);
/// ```
pub fn pairwise_intervals(instants: &[Instant]) -> Result<Vec<Interval>, CadenceError> {
    instants
        .windows(2)
        .map(|pair| Interval::new(pair[0], pair[1]))
        .collect()
}

/// Textual variant of [`pairwise_intervals`].
///
/// Instants are parsed lazily alongside the ordering check, so a bad value
/// after the first failing pair is never looked at.
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` on the first unparsable instant
/// or non-increasing pair.
pub fn pairwise_intervals_iso<S: AsRef<str>>(instants: &[S]) -> Result<Vec<Interval>, CadenceError> {
    if instants.len() <= 1 {
        return Ok(Vec::new());
    }
    let mut out = Vec::with_capacity(instants.len() - 1);
    let mut prev = parse_instant(instants[0].as_ref())?;
    for raw in &instants[1..] {
        let cur = parse_instant(raw.as_ref())?;
        out.push(Interval::new(prev, cur)?);
        prev = cur;
    }
    Ok(out)
}

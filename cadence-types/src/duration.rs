//! Calendar durations and the fixed granularity ladder used for frequency estimation.

use std::fmt;

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::CadenceError;

// Canonical average calendar lengths in seconds (year = 365.25 days, month = year / 12).
const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3_600;
const SECONDS_PER_DAY: u32 = 86_400;
const SECONDS_PER_WEEK: u32 = 604_800;
const SECONDS_PER_MONTH: u32 = 2_629_800;
const SECONDS_PER_YEAR: u32 = 31_557_600;

/// A calendar duration with explicit, named units.
///
/// Adding a `DurationSpec` to an instant is calendar aware: `years` and
/// `months` move the calendar month (clamping to the last valid day of the
/// target month), while `weeks`, `days`, `hours`, `minutes`, and `seconds`
/// are exact spans on the UTC timeline.
///
/// Converting to seconds ignores the calendar and uses the fixed table
/// `hour = 3600`, `day = 86400`, `week = 604800`, `month = 2629800`,
/// `year = 31557600`.
///
/// ```
/// use cadence_types::DurationSpec;
/// let d = DurationSpec::days(3);
/// assert_eq!(d.as_seconds(), 259_200.0);
/// assert!(!d.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationSpec {
    /// Whole calendar years.
    pub years: u32,
    /// Whole calendar months.
    pub months: u32,
    /// Weeks of exactly seven days.
    pub weeks: u32,
    /// Days of exactly 24 hours.
    pub days: u32,
    /// Hours.
    pub hours: u32,
    /// Minutes.
    pub minutes: u32,
    /// Seconds.
    pub seconds: u32,
}

impl DurationSpec {
    /// The empty duration.
    pub const ZERO: Self = Self {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// A duration of `n` calendar years.
    #[must_use]
    pub const fn years(n: u32) -> Self {
        Self {
            years: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` calendar months.
    #[must_use]
    pub const fn months(n: u32) -> Self {
        Self {
            months: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` weeks.
    #[must_use]
    pub const fn weeks(n: u32) -> Self {
        Self {
            weeks: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` days.
    #[must_use]
    pub const fn days(n: u32) -> Self {
        Self {
            days: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` hours.
    #[must_use]
    pub const fn hours(n: u32) -> Self {
        Self {
            hours: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` minutes.
    #[must_use]
    pub const fn minutes(n: u32) -> Self {
        Self {
            minutes: n,
            ..Self::ZERO
        }
    }

    /// A duration of `n` seconds.
    #[must_use]
    pub const fn seconds(n: u32) -> Self {
        Self {
            seconds: n,
            ..Self::ZERO
        }
    }

    /// True when every unit is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.weeks == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// Length in seconds according to the fixed calendar table.
    #[must_use]
    pub fn as_seconds(&self) -> f64 {
        f64::from(self.years) * f64::from(SECONDS_PER_YEAR)
            + f64::from(self.months) * f64::from(SECONDS_PER_MONTH)
            + f64::from(self.weeks) * f64::from(SECONDS_PER_WEEK)
            + f64::from(self.days) * f64::from(SECONDS_PER_DAY)
            + f64::from(self.hours) * f64::from(SECONDS_PER_HOUR)
            + f64::from(self.minutes) * f64::from(SECONDS_PER_MINUTE)
            + f64::from(self.seconds)
    }

    /// Length in whole days according to the fixed calendar table (truncated).
    #[must_use]
    pub fn as_days(&self) -> f64 {
        (self.as_seconds() / f64::from(SECONDS_PER_DAY)).trunc()
    }

    /// Reject the zero duration for a named configuration field.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidArg` when the duration is zero.
    pub fn validate(&self, field: &str) -> Result<(), CadenceError> {
        if self.is_zero() {
            return Err(CadenceError::InvalidArg(format!(
                "{field} must be a non-zero duration"
            )));
        }
        Ok(())
    }

    /// Compute `anchor + times * self`, or `None` on overflow.
    ///
    /// The multiple is always taken from the anchor, so month clamping in an
    /// early step never shifts later steps.
    #[must_use]
    pub fn checked_add_times(&self, anchor: DateTime<Utc>, times: u32) -> Option<DateTime<Utc>> {
        let months = self.calendar_months(times)?;
        let delta = self.exact_delta(times)?;
        anchor
            .checked_add_months(Months::new(months))?
            .checked_add_signed(delta)
    }

    /// Compute `anchor + self`, or `None` on overflow.
    #[must_use]
    pub fn checked_add_to(&self, anchor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.checked_add_times(anchor, 1)
    }

    /// Compute `anchor - self`, or `None` on overflow.
    #[must_use]
    pub fn checked_sub_from(&self, anchor: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = self.calendar_months(1)?;
        let delta = self.exact_delta(1)?;
        anchor
            .checked_sub_months(Months::new(months))?
            .checked_sub_signed(delta)
    }

    fn calendar_months(&self, times: u32) -> Option<u32> {
        self.years
            .checked_mul(12)?
            .checked_add(self.months)?
            .checked_mul(times)
    }

    fn exact_delta(&self, times: u32) -> Option<TimeDelta> {
        let secs = i64::from(self.weeks) * i64::from(SECONDS_PER_WEEK)
            + i64::from(self.days) * i64::from(SECONDS_PER_DAY)
            + i64::from(self.hours) * i64::from(SECONDS_PER_HOUR)
            + i64::from(self.minutes) * i64::from(SECONDS_PER_MINUTE)
            + i64::from(self.seconds);
        TimeDelta::try_seconds(secs.checked_mul(i64::from(times))?)
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0s");
        }
        let parts = [
            (self.years, "y"),
            (self.months, "mo"),
            (self.weeks, "w"),
            (self.days, "d"),
            (self.hours, "h"),
            (self.minutes, "m"),
            (self.seconds, "s"),
        ];
        for (n, unit) in parts.into_iter().filter(|(n, _)| *n > 0) {
            write!(f, "{n}{unit}")?;
        }
        Ok(())
    }
}

/// Bucket granularity used to bin events before averaging.
///
/// Variants are declared finest to coarsest; `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePeriod {
    /// One hour.
    Hour,
    /// One day.
    Day,
    /// One week.
    Week,
    /// One calendar month.
    Month,
    /// Six calendar months.
    SixMonths,
    /// One calendar year.
    Year,
}

impl TimePeriod {
    /// Every candidate granularity, finest first.
    pub const ALL: [Self; 6] = [
        Self::Hour,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::SixMonths,
        Self::Year,
    ];

    /// Canonical length of the period in seconds.
    #[must_use]
    pub const fn seconds(self) -> u32 {
        match self {
            Self::Hour => SECONDS_PER_HOUR,
            Self::Day => SECONDS_PER_DAY,
            Self::Week => SECONDS_PER_WEEK,
            Self::Month => SECONDS_PER_MONTH,
            Self::SixMonths => 6 * SECONDS_PER_MONTH,
            Self::Year => SECONDS_PER_YEAR,
        }
    }

    /// The calendar duration used when splitting a window into bins.
    #[must_use]
    pub const fn as_duration(self) -> DurationSpec {
        match self {
            Self::Hour => DurationSpec::hours(1),
            Self::Day => DurationSpec::days(1),
            Self::Week => DurationSpec::weeks(1),
            Self::Month => DurationSpec::months(1),
            Self::SixMonths => DurationSpec::months(6),
            Self::Year => DurationSpec::years(1),
        }
    }

    /// Short lowercase label, e.g. `"6 months"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::SixMonths => "6 months",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

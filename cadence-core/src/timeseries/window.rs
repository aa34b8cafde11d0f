use crate::timeseries::interval::{Interval, split_range};
use crate::{CadenceError, DurationSpec, Instant, ReportConfig};

/// Partition the reporting range into consecutive sample points.
///
/// Each sample point is a sub-interval of length `sampling_frequency`; the
/// last one is shortened to the end of the range. An empty or inverted range
/// yields no sample points.
#[must_use]
pub fn split_into_sample_points(
    report_start: Instant,
    report_end: Instant,
    sampling_frequency: DurationSpec,
) -> Vec<Interval> {
    split_range(report_start, report_end, sampling_frequency)
}

/// Build the mapping from a sample point to its look-back window.
///
/// The window ends where the sample point ends and reaches back by
/// `window_duration`. Its start is not clipped to the reporting range.
///
/// ```
/// use cadence_core::{window_for_sample_point, Interval, DurationSpec, parse_instant};
/// let sample = Interval::new(
///     parse_instant("2019-06-20T18:00:00Z").unwrap(),
///     parse_instant("2019-06-30T18:00:00Z").unwrap(),
/// ).unwrap();
/// let w = window_for_sample_point(DurationSpec::days(20))(&sample).unwrap();
/// assert_eq!(w.end(), sample.end());
/// assert_eq!(w.start(), parse_instant("2019-06-10T18:00:00Z").unwrap());
/// ```
pub fn window_for_sample_point(
    window_duration: DurationSpec,
) -> impl Fn(&Interval) -> Result<Interval, CadenceError> + Copy {
    move |sample: &Interval| {
        let end = sample.end();
        let start = window_duration.checked_sub_from(end).ok_or_else(|| {
            CadenceError::invalid_interval(format!(
                "window of {window_duration} before {end} is out of range"
            ))
        })?;
        Interval::new(start, end)
    }
}

/// Rolling look-back windows, one per sample point, in sample order.
///
/// Window ends are strictly increasing and the last window ends at
/// `report_end` (when the range is non-empty).
///
/// # Errors
/// Returns `CadenceError::InvalidInterval` if `window_duration` is zero or
/// reaches outside the representable time range.
pub fn rolling_windows(
    report_start: Instant,
    report_end: Instant,
    sampling_frequency: DurationSpec,
    window_duration: DurationSpec,
) -> Result<Vec<Interval>, CadenceError> {
    let to_window = window_for_sample_point(window_duration);
    split_into_sample_points(report_start, report_end, sampling_frequency)
        .iter()
        .map(to_window)
        .collect()
}

/// [`rolling_windows`] driven by a validated [`ReportConfig`].
///
/// # Errors
/// Returns `CadenceError::InvalidArg` if the config has a zero duration, or any
/// error from [`rolling_windows`].
pub fn rolling_windows_for(cfg: &ReportConfig) -> Result<Vec<Interval>, CadenceError> {
    cfg.validate()?;
    rolling_windows(
        cfg.report_start,
        cfg.report_end,
        cfg.sampling_frequency,
        cfg.window_size,
    )
}

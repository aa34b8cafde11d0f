use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of a metric time series: `(timestamp_millis, value)`.
///
/// Serializes as a two-element array `[timestamp, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint<T>(pub i64, pub T);

impl<T: Copy> SeriesPoint<T> {
    /// Epoch milliseconds of the sample (the end of its window).
    #[must_use]
    pub const fn timestamp_millis(&self) -> i64 {
        self.0
    }

    /// Sampled value.
    #[must_use]
    pub const fn value(&self) -> T {
        self.1
    }
}

/// Everything the rendering collaborator needs to draw a cadence report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Display name of the project the report covers.
    pub project_name: String,
    /// Rolling window length in whole days, for labelling.
    pub window_size_days: f64,
    /// Deployment frequency per window, in Hertz.
    pub deploy_freq_data: Vec<SeriesPoint<f64>>,
    /// Mean lead time per window, in milliseconds.
    pub lead_time_data: Vec<SeriesPoint<i64>>,
    /// Raw in-range deployment timestamps (epoch millis) for histogram display.
    pub deploy_timestamps: Vec<i64>,
}

/// A single change shipped with a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// When the change was authored.
    pub timestamp: DateTime<Utc>,
    /// Commit identifier.
    pub change_id: String,
}

/// A release and the changes it introduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// When the release was deployed.
    pub timestamp: DateTime<Utc>,
    /// Revision identifier of the release.
    pub release_id: String,
    /// Changes first shipped by this release, oldest history order preserved.
    pub changes: Vec<Change>,
}

/// Release history envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseData {
    /// Releases in deployment order.
    pub releases: Vec<Release>,
}

//! Configuration types shared by the orchestrator and report generation.

use std::time::Duration;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::{CadenceError, DurationSpec};

/// How a window's deployments are turned into a single frequency value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FrequencyMethod {
    /// Bin the window at the finest granularity that averages at least one
    /// deployment per bin, then convert that rate to Hertz.
    #[default]
    BestMean,
    /// Reciprocal of the mean gap between consecutive deployments.
    InterArrival,
}

/// Global configuration for the `Cadence` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadenceConfig {
    /// Maximum number of commit-history lookups in flight at once.
    pub lookup_concurrency: usize,
    /// Timeout for each individual collaborator call.
    pub lookup_timeout: Duration,
    /// Optional deadline for a whole computation (lead-time series, release data).
    pub request_timeout: Option<Duration>,
    /// Drop deployments whose revision the commit history does not know about
    /// before computing lead times.
    pub verify_deployments: bool,
    /// Estimator used for the deployment-frequency series.
    pub frequency_method: FrequencyMethod,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            lookup_concurrency: 8,
            lookup_timeout: Duration::from_secs(30),
            request_timeout: None,
            verify_deployments: true,
            frequency_method: FrequencyMethod::default(),
        }
    }
}

impl CadenceConfig {
    /// Check invariants that the builder cannot express in types.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidArg` if `lookup_concurrency` is zero or a
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), CadenceError> {
        if self.lookup_concurrency == 0 {
            return Err(CadenceError::InvalidArg(
                "lookup_concurrency must be at least 1".into(),
            ));
        }
        if self.lookup_timeout.is_zero() {
            return Err(CadenceError::InvalidArg(
                "lookup_timeout must be non-zero".into(),
            ));
        }
        if self.request_timeout.is_some_and(|d| d.is_zero()) {
            return Err(CadenceError::InvalidArg(
                "request_timeout must be non-zero when set".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of one report run: the reporting range and rolling-window shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Display name of the project.
    pub project_name: String,
    /// Inclusive start of the reporting range.
    pub report_start: DateTime<Utc>,
    /// End of the reporting range; the last window ends here.
    pub report_end: DateTime<Utc>,
    /// Distance between consecutive sample points.
    pub sampling_frequency: DurationSpec,
    /// Look-back length of each window.
    pub window_size: DurationSpec,
}

impl ReportConfig {
    /// Default distance between sample points.
    pub const DEFAULT_SAMPLING_FREQUENCY: DurationSpec = DurationSpec::days(3);
    /// Default rolling window length.
    pub const DEFAULT_WINDOW_SIZE: DurationSpec = DurationSpec::days(30);

    /// A report over `[report_start, report_end]` with default sampling (3 days)
    /// and window size (30 days).
    pub fn new(
        project_name: impl Into<String>,
        report_start: DateTime<Utc>,
        report_end: DateTime<Utc>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            report_start,
            report_end,
            sampling_frequency: Self::DEFAULT_SAMPLING_FREQUENCY,
            window_size: Self::DEFAULT_WINDOW_SIZE,
        }
    }

    /// A report covering `months` calendar months back from `report_end`.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidArg` if `months` is zero or the start
    /// would fall outside the representable range.
    pub fn months_back(
        project_name: impl Into<String>,
        report_end: DateTime<Utc>,
        months: u32,
    ) -> Result<Self, CadenceError> {
        if months == 0 {
            return Err(CadenceError::InvalidArg(
                "report timeframe must be at least one month".into(),
            ));
        }
        let start = report_end
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| CadenceError::InvalidArg(format!("{months} months before {report_end} is out of range")))?;
        Ok(Self::new(project_name, start, report_end))
    }

    /// Override the sampling frequency.
    #[must_use]
    pub const fn with_sampling_frequency(mut self, d: DurationSpec) -> Self {
        self.sampling_frequency = d;
        self
    }

    /// Override the window size.
    #[must_use]
    pub const fn with_window_size(mut self, d: DurationSpec) -> Self {
        self.window_size = d;
        self
    }

    /// Validate duration fields.
    ///
    /// An empty or inverted range is not an error; it simply yields no windows.
    ///
    /// # Errors
    /// Returns `CadenceError::InvalidArg` if either duration is zero.
    pub fn validate(&self) -> Result<(), CadenceError> {
        self.sampling_frequency.validate("sampling_frequency")?;
        self.window_size.validate("window_size")
    }
}

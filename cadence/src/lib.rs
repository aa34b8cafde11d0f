//! Cadence computes DORA delivery metrics from deployment and commit history.
//!
//! Overview
//! - Deployment frequency: rolling windows over the reporting range, each
//!   binned at the finest granularity averaging at least one deployment, and
//!   expressed in Hertz so windows of differing cadence compare directly.
//! - Lead time: for consecutive deployments inside each window, the time from
//!   every commit the later deployment introduced to its release, averaged in
//!   integer milliseconds.
//! - Release data: the changes each deployment shipped, for export.
//!
//! Key behaviors and trade-offs
//! - Commit lookups are the only I/O. They run with bounded concurrency
//!   (`lookup_concurrency`), each under `lookup_timeout`; output order always
//!   follows window order, never completion order.
//! - Failure policy: the first failed or timed-out lookup aborts the whole
//!   computation. No partial series is returned.
//! - Deployment verification: unknown revisions are dropped before lead-time
//!   lookups. A failed existence check counts as "unknown" and is never fatal.
//! - Window and bin containment is `[start, end)`.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use cadence::{Cadence, ReportConfig};
//!
//! let git = Arc::new(GitHistory::open(".")?);
//! let cadence = Cadence::builder()
//!     .with_history(git)
//!     .lookup_concurrency(4)
//!     .request_timeout(std::time::Duration::from_secs(120))
//!     .build()?;
//!
//! let cfg = ReportConfig::months_back("my-service", chrono::Utc::now(), 3)?;
//! let report = cadence.generate_report(&cfg).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! See `cadence/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod metrics;

pub use core::{Cadence, CadenceBuilder};
pub use metrics::frequency::{deployment_frequency_series, window_frequency};
pub use metrics::lead_time::{DeployGroup, get_pairs};
pub use metrics::util::{join_ordered, try_join_ordered};

// Re-export core types for convenience
pub use cadence_core::{
    CadenceConfig,
    CadenceError,
    Change,
    CommitEvent,
    CommitHistorySource,
    DeploymentEvent,
    DeploymentSource,
    DurationSpec,
    FrequencyMethod,
    FrequencyResult,
    Instant,
    Interval,
    MetricsReport,
    Release,
    ReleaseData,
    ReportConfig,
    SeriesPoint,
    TimePeriod,
    rolling_windows,
    rolling_windows_for,
};

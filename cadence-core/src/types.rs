//! Re-export of foundational types from `cadence-types`.
// Consolidated re-exports so downstream crates can depend on `cadence-core` only

pub use cadence_types::{CadenceError, Instant};

pub use cadence_types::{CadenceConfig, FrequencyMethod, ReportConfig};
pub use cadence_types::{CommitEvent, DeploymentEvent};
pub use cadence_types::{DurationSpec, TimePeriod};
pub use cadence_types::{Change, MetricsReport, Release, ReleaseData, SeriesPoint};

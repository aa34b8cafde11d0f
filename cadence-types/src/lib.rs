//! Cadence-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod duration;
mod error;
mod events;
mod reports;

pub use config::{CadenceConfig, FrequencyMethod, ReportConfig};
pub use duration::{DurationSpec, TimePeriod};
pub use error::CadenceError;
pub use events::{CommitEvent, DeploymentEvent, Instant};
pub use reports::{Change, MetricsReport, Release, ReleaseData, SeriesPoint};

//! cadence-core
//!
//! Core types, traits, and pure computations shared across the cadence workspace.
//!
//! - `types`: re-exported data transfer objects (events, durations, errors, reports).
//! - `connector`: the `DeploymentSource` and `CommitHistorySource` collaborator traits.
//! - `timeseries`: intervals, rolling windows, and frequency estimation.
//!
//! Everything under `timeseries` is synchronous and free of shared state, so
//! windows can be evaluated in any order (or in parallel) with identical results.
//! The only suspension points in the workspace are the collaborator traits.
#![warn(missing_docs)]

/// Collaborator traits for deployment and commit-history sources.
pub mod connector;
/// Interval, window, and frequency utilities.
pub mod timeseries;
pub mod types;

pub use connector::{CommitHistorySource, DeploymentSource, revision_query};
pub use timeseries::frequency::{
    FrequencyResult, average_frequency, average_frequency_iso, best_mean_frequency, count_per_bin,
    mean_frequency_per_time_period, median_frequency_per_time_period, to_hertz,
};
pub use timeseries::interval::{
    Interval, pairwise_intervals, pairwise_intervals_iso, parse_instant, split_range,
};
pub use timeseries::window::{
    rolling_windows, rolling_windows_for, split_into_sample_points, window_for_sample_point,
};
pub use types::*;

//! Time-series utilities shared by the orchestrator and report generation.
//!
//! Modules include:
//! - `interval`: validated intervals, range splitting, and pairwise extraction
//! - `window`: sample points and rolling look-back windows
//! - `frequency`: average, binned, and adaptive-granularity frequency estimation
/// Adaptive-granularity frequency estimation and Hertz conversion.
pub mod frequency;
/// Validated intervals, range splitting, and pairwise interval extraction.
pub mod interval;
/// Rolling window generation over a reporting range.
pub mod window;

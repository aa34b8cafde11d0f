#![allow(dead_code)]

use std::sync::Arc;

use cadence::{Cadence, CommitEvent, DeploymentEvent, Instant, Interval};
use cadence_mock::{DynamicMockController, DynamicMockHistory, MockHistory};

pub const DAY_MS: i64 = 86_400_000;

/// Construct a UTC `DateTime` from components for readability in tests.
pub const fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> Instant {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Midnight UTC on a June 2020 day, the month most scenarios live in.
pub const fn june(d: u32) -> Instant {
    dt(2020, 6, d, 0, 0, 0)
}

pub fn deploy(id: &str, at: Instant) -> DeploymentEvent {
    DeploymentEvent::new(id, at)
}

pub fn commit(id: &str, at: Instant) -> CommitEvent {
    CommitEvent::new(id, at)
}

pub fn window(start: Instant, end: Instant) -> Interval {
    Interval::new(start, end).expect("valid window")
}

/// Scriptable mock registered as "P0".
pub fn dynamic() -> (Arc<DynamicMockHistory>, DynamicMockController) {
    DynamicMockHistory::new_with_controller("P0")
}

/// Builder over the dynamic mock with deployment verification off.
pub fn cadence_over(mock: &Arc<DynamicMockHistory>) -> cadence::CadenceBuilder {
    Cadence::builder()
        .with_history(Arc::clone(mock))
        .verify_deployments(false)
}

pub fn fixture_cadence() -> Cadence {
    Cadence::builder()
        .with_history(Arc::new(MockHistory::new()))
        .build()
        .expect("valid cadence")
}

use std::sync::Arc;

use cadence::{
    Cadence, DurationSpec, FrequencyMethod, SeriesPoint, deployment_frequency_series,
    rolling_windows,
};
use cadence_core::average_frequency;
use cadence_mock::MockHistory;

use crate::helpers::{dt, june, window};

#[test]
fn one_deploy_per_week_in_a_fourteen_day_window() {
    let w = window(dt(2020, 6, 11, 0, 0, 0), dt(2020, 6, 25, 0, 0, 0));
    let deploys = MockHistory::fixture_deployments();
    let series =
        deployment_frequency_series(&deploys, std::slice::from_ref(&w), FrequencyMethod::BestMean)
            .unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].timestamp_millis(), w.end_millis());
    assert!((series[0].value() - 1.0 / 604_800.0).abs() < 1e-15);
}

#[test]
fn one_point_per_window_tagged_with_window_end() {
    let windows = rolling_windows(
        june(1),
        dt(2020, 7, 1, 0, 0, 0),
        DurationSpec::days(7),
        DurationSpec::days(14),
    )
    .unwrap();
    let deploys = MockHistory::fixture_deployments();
    let series = deployment_frequency_series(&deploys, &windows, FrequencyMethod::BestMean).unwrap();

    let ends: Vec<i64> = windows.iter().map(|w| w.end_millis()).collect();
    let stamps: Vec<i64> = series.iter().map(SeriesPoint::timestamp_millis).collect();
    assert_eq!(stamps, ends);
    assert!(series.iter().all(|p| p.value() >= 0.0));
}

#[test]
fn windows_without_deploys_report_zero() {
    let windows = rolling_windows(
        dt(2021, 1, 1, 0, 0, 0),
        dt(2021, 2, 1, 0, 0, 0),
        DurationSpec::days(7),
        DurationSpec::days(14),
    )
    .unwrap();
    let deploys = MockHistory::fixture_deployments();
    let series = deployment_frequency_series(&deploys, &windows, FrequencyMethod::BestMean).unwrap();
    assert!(!series.is_empty());
    assert!(series.iter().all(|p| p.value() == 0.0));
}

#[test]
fn inter_arrival_uses_in_window_gaps() {
    let cadence = Cadence::builder()
        .with_history(Arc::new(MockHistory::new()))
        .frequency_method(FrequencyMethod::InterArrival)
        .build()
        .unwrap();
    let w = window(june(1), dt(2020, 7, 1, 0, 0, 0));
    let deploys = MockHistory::fixture_deployments();
    let series = cadence
        .deployment_frequency(&deploys, std::slice::from_ref(&w))
        .unwrap();

    let ts: Vec<_> = deploys.iter().map(|d| d.time_created).collect();
    let expected = average_frequency(&ts).unwrap();
    assert_eq!(series, vec![SeriesPoint(w.end_millis(), expected)]);
}

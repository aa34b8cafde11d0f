use std::sync::Arc;

use cadence::{CadenceError, DurationSpec, ReportConfig, SeriesPoint};
use cadence_mock::{MockBehavior, MockHistory};

use crate::helpers::{cadence_over, dt, dynamic, fixture_cadence, june};

fn june_report() -> ReportConfig {
    ReportConfig::new("fixture", june(1), dt(2020, 7, 1, 0, 0, 0))
        .with_sampling_frequency(DurationSpec::days(7))
        .with_window_size(DurationSpec::days(14))
}

#[tokio::test]
async fn fixture_report_has_one_point_per_window() {
    let report = fixture_cadence().generate_report(&june_report()).await.unwrap();

    let ends = [8, 15, 22, 29].map(|d| june(d).timestamp_millis());
    let mut expected_ends = ends.to_vec();
    expected_ends.push(dt(2020, 7, 1, 0, 0, 0).timestamp_millis());

    let freq_ts: Vec<i64> = report.deploy_freq_data.iter().map(SeriesPoint::timestamp_millis).collect();
    let lead_ts: Vec<i64> = report.lead_time_data.iter().map(SeriesPoint::timestamp_millis).collect();
    assert_eq!(freq_ts, expected_ends);
    assert_eq!(lead_ts, expected_ends);

    assert_eq!(report.project_name, "fixture");
    assert!((report.window_size_days - 14.0).abs() < f64::EPSILON);
    assert_eq!(report.deploy_timestamps.len(), 6);
}

#[tokio::test]
async fn fixture_lead_time_for_first_window() {
    let report = fixture_cadence().generate_report(&june_report()).await.unwrap();
    // [May 25, Jun 8): three deploys, two pairs, three commits
    // 6h30m, 3d9h40m and 2d3h05m average to 1d22h25m
    assert_eq!(report.lead_time_data[0], SeriesPoint(june(8).timestamp_millis(), 167_100_000));
}

#[tokio::test]
async fn deploy_timestamps_respect_report_range() {
    let cfg = ReportConfig::new("fixture", dt(2020, 6, 2, 0, 0, 0), dt(2020, 6, 18, 18, 0, 0));
    let report = fixture_cadence().generate_report(&cfg).await.unwrap();
    let expected: Vec<i64> = MockHistory::fixture_deployments()
        .iter()
        .map(|d| d.time_created)
        .filter(|t| cfg.report_start <= *t && *t < cfg.report_end)
        .map(|t| t.timestamp_millis())
        .collect();
    assert_eq!(expected.len(), 3);
    assert_eq!(report.deploy_timestamps, expected);
}

#[tokio::test]
async fn zero_window_is_rejected_before_fetching() {
    let (mock, controller) = dynamic();
    let cadence = cadence_over(&mock).build().unwrap();
    let cfg = june_report().with_window_size(DurationSpec::ZERO);
    let err = cadence.generate_report(&cfg).await.unwrap_err();
    assert!(matches!(err, CadenceError::InvalidArg(_)));
    assert!(controller.commit_requests().await.is_empty());
}

#[tokio::test]
async fn lookup_failure_aborts_the_report() {
    let (mock, controller) = dynamic();
    controller
        .set_deployments_behavior(MockBehavior::Return(MockHistory::fixture_deployments()))
        .await;
    let cadence = cadence_over(&mock).build().unwrap();
    let err = cadence.generate_report(&june_report()).await.unwrap_err();
    assert!(err.is_lookup_failure());
}

#[tokio::test]
async fn report_serializes_series_as_pairs() {
    let cadence = cadence::Cadence::builder()
        .with_history(Arc::new(MockHistory::new()))
        .build()
        .unwrap();
    let report = cadence.generate_report(&june_report()).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["projectName"], "fixture");
    assert_eq!(json["leadTimeData"][0][1], 167_100_000);
    assert_eq!(json["deployFreqData"].as_array().unwrap().len(), 5);
    assert_eq!(json["deployTimestamps"].as_array().unwrap().len(), 6);
}

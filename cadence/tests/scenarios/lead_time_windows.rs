use std::time::Duration;

use cadence::{DurationSpec, SeriesPoint, rolling_windows};
use cadence_mock::MockBehavior;

use crate::helpers::{DAY_MS, cadence_over, commit, deploy, dt, dynamic, june, window};

#[tokio::test]
async fn pair_lead_time_is_release_minus_commit() {
    let (mock, controller) = dynamic();
    let w = window(june(1), dt(2020, 7, 1, 0, 0, 0));
    let d1 = deploy("d1", june(10));
    let d2 = deploy("d2", june(12));
    controller
        .set_commits_behavior("d1..d2", MockBehavior::Return(vec![commit("c1", june(5))]))
        .await;

    let cadence = cadence_over(&mock).build().unwrap();
    let point = cadence
        .calculate_mean_lead_time_for_window(&w, &[d1, d2])
        .await
        .unwrap();
    assert_eq!(point, SeriesPoint(w.end_millis(), 7 * DAY_MS));
}

#[tokio::test]
async fn single_deploy_is_measured_against_its_ancestry() {
    let (mock, controller) = dynamic();
    let w = window(june(1), june(15));
    let d1 = deploy("d1", june(10));
    controller
        .set_commits_behavior(
            "d1",
            MockBehavior::Return(vec![commit("c1", june(5)), commit("c2", june(9))]),
        )
        .await;

    let cadence = cadence_over(&mock).build().unwrap();
    let point = cadence
        .calculate_mean_lead_time_for_window(&w, &[d1])
        .await
        .unwrap();
    assert_eq!(point, SeriesPoint(w.end_millis(), 3 * DAY_MS));
    assert_eq!(controller.commit_requests().await, vec!["d1".to_string()]);
}

#[tokio::test]
async fn empty_window_reports_zero_without_lookups() {
    let (mock, controller) = dynamic();
    let w = window(june(1), june(15));

    let cadence = cadence_over(&mock).build().unwrap();
    let point = cadence
        .calculate_mean_lead_time_for_window(&w, &[])
        .await
        .unwrap();
    assert_eq!(point, SeriesPoint(w.end_millis(), 0));
    assert!(controller.commit_requests().await.is_empty());
}

#[tokio::test]
async fn release_without_new_commits_reports_zero() {
    let (mock, controller) = dynamic();
    let w = window(june(1), june(15));
    controller
        .set_commits_behavior("d1..d2", MockBehavior::Return(vec![]))
        .await;

    let cadence = cadence_over(&mock).build().unwrap();
    let point = cadence
        .calculate_mean_lead_time_for_window(&w, &[deploy("d1", june(3)), deploy("d2", june(4))])
        .await
        .unwrap();
    assert_eq!(point.value(), 0);
}

#[tokio::test(start_paused = true)]
async fn output_follows_window_order_not_completion_order() {
    let (mock, controller) = dynamic();
    let early = window(june(1), june(8));
    let late = window(june(8), june(15));
    controller
        .set_commits_behavior(
            "a..b",
            MockBehavior::Delayed(Duration::from_secs(10), vec![commit("c1", june(2))]),
        )
        .await;
    controller
        .set_commits_behavior(
            "c..d",
            MockBehavior::Delayed(Duration::from_millis(10), vec![commit("c2", june(9))]),
        )
        .await;

    let deploys = [
        deploy("a", june(3)),
        deploy("b", june(4)),
        deploy("c", june(10)),
        deploy("d", june(12)),
    ];
    let cadence = cadence_over(&mock).build().unwrap();
    let series = cadence
        .calculate_average_lead_time(&deploys, &[early, late])
        .await
        .unwrap();
    assert_eq!(
        series,
        vec![
            SeriesPoint(early.end_millis(), 2 * DAY_MS),
            SeriesPoint(late.end_millis(), 3 * DAY_MS),
        ]
    );
}

#[tokio::test]
async fn window_boundaries_are_half_open() {
    let (mock, controller) = dynamic();
    let w = window(june(1), june(8));
    controller
        .set_commits_behavior("in", MockBehavior::Return(vec![commit("c", dt(2020, 5, 31, 0, 0, 0))]))
        .await;

    // `in` sits on the window start, `out` on its end
    let deploys = [deploy("in", june(1)), deploy("out", june(8))];
    let cadence = cadence_over(&mock).build().unwrap();
    let series = cadence
        .calculate_average_lead_time(&deploys, &[w])
        .await
        .unwrap();
    assert_eq!(series, vec![SeriesPoint(w.end_millis(), DAY_MS)]);
    assert_eq!(controller.commit_requests().await, vec!["in".to_string()]);
}

#[tokio::test]
async fn overlapping_windows_share_lookups() {
    let (mock, controller) = dynamic();
    controller
        .set_commits_behavior("a..b", MockBehavior::Return(vec![commit("c1", june(9))]))
        .await;

    let windows = rolling_windows(
        june(1),
        june(22),
        DurationSpec::days(7),
        DurationSpec::days(21),
    )
    .unwrap();
    let deploys = [deploy("a", june(10)), deploy("b", june(11))];
    let cadence = cadence_over(&mock).build().unwrap();
    let series = cadence
        .calculate_average_lead_time(&deploys, &windows)
        .await
        .unwrap();

    assert_eq!(series.len(), windows.len());
    assert!(series[1..].iter().all(|p| p.value() == 2 * DAY_MS));
    assert_eq!(controller.commit_requests().await, vec!["a..b".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn lookups_respect_concurrency_limit() {
    let (mock, controller) = dynamic();
    let ids: Vec<String> = (0..6).map(|i| format!("r{i}")).collect();
    for pair in ids.windows(2) {
        controller
            .set_commits_behavior(
                format!("{}..{}", pair[0], pair[1]),
                MockBehavior::Delayed(Duration::from_millis(50), vec![]),
            )
            .await;
    }

    let deploys: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| deploy(id, dt(2020, 6, 2 + u32::try_from(i).unwrap(), 0, 0, 0)))
        .collect();
    let cadence = cadence_over(&mock).lookup_concurrency(2).build().unwrap();
    cadence
        .calculate_average_lead_time(&deploys, &[window(june(1), june(15))])
        .await
        .unwrap();

    assert_eq!(controller.commit_requests().await.len(), 5);
    assert_eq!(controller.max_in_flight(), 2);
}

#[tokio::test]
async fn distinct_deployments_of_one_revision_are_looked_up_separately() {
    let (mock, controller) = dynamic();
    controller
        .set_commits_behavior("a", MockBehavior::Return(vec![commit("c1", june(1))]))
        .await;

    // The same revision deployed twice, less than a millisecond apart
    let first = june(3);
    let second = first + chrono::TimeDelta::microseconds(500);
    let split = first + chrono::TimeDelta::microseconds(250);
    let windows = [window(june(1), split), window(split, june(8))];
    let deploys = [deploy("a", first), deploy("a", second)];

    let cadence = cadence_over(&mock).build().unwrap();
    let series = cadence
        .calculate_average_lead_time(&deploys, &windows)
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert!(series.iter().all(|p| p.value() == 2 * DAY_MS));
    assert_eq!(
        controller.commit_requests().await,
        vec!["a".to_string(), "a".to_string()]
    );
}

use std::time::Duration;

use cadence::{CadenceError, SeriesPoint};
use cadence_mock::MockBehavior;

use crate::helpers::{DAY_MS, cadence_over, commit, deploy, dynamic, june, window};

#[tokio::test]
async fn first_lookup_failure_aborts_the_series() {
    let (mock, controller) = dynamic();
    controller
        .set_commits_behavior("a..b", MockBehavior::Return(vec![commit("c1", june(2))]))
        .await;
    let boom = CadenceError::commit_lookup("P0", "c..d", "fatal: bad revision");
    controller
        .set_commits_behavior("c..d", MockBehavior::Fail(boom.clone()))
        .await;

    let deploys = [
        deploy("a", june(3)),
        deploy("b", june(4)),
        deploy("c", june(10)),
        deploy("d", june(12)),
    ];
    let windows = [window(june(1), june(8)), window(june(8), june(15))];
    let cadence = cadence_over(&mock).build().unwrap();
    let err = cadence
        .calculate_average_lead_time(&deploys, &windows)
        .await
        .unwrap_err();
    assert_eq!(err, boom);
    assert!(err.is_lookup_failure());
}

#[tokio::test(start_paused = true)]
async fn hung_lookup_times_out() {
    let (mock, controller) = dynamic();
    controller.set_commits_behavior("a", MockBehavior::Hang).await;

    let cadence = cadence_over(&mock)
        .lookup_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let err = cadence
        .calculate_average_lead_time(&[deploy("a", june(3))], &[window(june(1), june(8))])
        .await
        .unwrap_err();
    assert_eq!(err, CadenceError::lookup_timeout("P0", "commits"));
    assert!(err.is_lookup_failure());
    assert_eq!(controller.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn request_deadline_bounds_the_whole_series() {
    let (mock, controller) = dynamic();
    controller
        .set_commits_behavior("a", MockBehavior::Delayed(Duration::from_secs(10), vec![]))
        .await;

    let cadence = cadence_over(&mock)
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let err = cadence
        .calculate_average_lead_time(&[deploy("a", june(3))], &[window(june(1), june(8))])
        .await
        .unwrap_err();
    assert_eq!(err, CadenceError::request_timeout("lead_time"));
}

#[tokio::test]
async fn unverifiable_deployments_are_dropped() {
    let (mock, controller) = dynamic();
    controller
        .set_exists_behavior("ghost", MockBehavior::Return(false))
        .await;
    controller
        .set_exists_behavior(
            "flaky",
            MockBehavior::Fail(CadenceError::Other("git exited with 128".into())),
        )
        .await;
    controller
        .set_commits_behavior("a..b", MockBehavior::Return(vec![commit("c1", june(3))]))
        .await;

    let deploys = [
        deploy("a", june(2)),
        deploy("ghost", june(3)),
        deploy("flaky", june(4)),
        deploy("b", june(5)),
    ];
    let w = window(june(1), june(8));
    let cadence = cadence_over(&mock).verify_deployments(true).build().unwrap();
    let series = cadence
        .calculate_average_lead_time(&deploys, &[w])
        .await
        .unwrap();

    assert_eq!(series, vec![SeriesPoint(w.end_millis(), 2 * DAY_MS)]);
    assert_eq!(controller.commit_requests().await, vec!["a..b".to_string()]);
    assert_eq!(controller.exists_requests().await.len(), 4);
}

#[tokio::test]
async fn verification_disabled_skips_existence_checks() {
    let (mock, controller) = dynamic();
    controller
        .set_commits_behavior("a", MockBehavior::Return(vec![]))
        .await;

    let cadence = cadence_over(&mock).build().unwrap();
    let kept = cadence.verified_deployments(&[deploy("a", june(2))]).await;
    assert_eq!(kept.len(), 1);
    assert!(controller.exists_requests().await.is_empty());
}

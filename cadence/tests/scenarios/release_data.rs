use std::sync::Arc;

use cadence::{Cadence, CadenceError, ReleaseData};
use cadence_mock::{MockBehavior, MockHistory};

use crate::helpers::{deploy, dynamic, fixture_cadence, june};

#[tokio::test]
async fn releases_carry_the_commits_they_introduced() {
    let data = fixture_cadence().gather_release_data().await.unwrap();

    let deploys = MockHistory::fixture_deployments();
    assert_eq!(data.releases.len(), deploys.len());
    for (release, d) in data.releases.iter().zip(&deploys) {
        assert_eq!(release.release_id, d.id);
        assert_eq!(release.timestamp, d.time_created);
        assert_eq!(release.changes.last().map(|c| c.change_id.as_str()), Some(d.id.as_str()));
    }

    let first: Vec<_> = data.releases[0].changes.iter().map(|c| c.change_id.as_str()).collect();
    assert_eq!(first, vec!["a1f3c2e", "b27d9e0", "c93e1aa"]);
    assert_eq!(data.releases[1].changes.len(), 1);

    let shipped: usize = data.releases.iter().map(|r| r.changes.len()).sum();
    assert_eq!(shipped, MockHistory::fixture_commits().len());
}

#[tokio::test]
async fn release_data_serializes_in_camel_case() {
    let data = fixture_cadence().gather_release_data().await.unwrap();
    let json = serde_json::to_value(&data).unwrap();
    let first = &json["releases"][0];
    assert_eq!(first["releaseId"], "c93e1aa");
    assert_eq!(first["changes"][0]["changeId"], "a1f3c2e");
    assert!(first["timestamp"].as_str().unwrap().starts_with("2020-06-01T14:00:00"));
}

#[tokio::test]
async fn no_deployments_yield_empty_release_list() {
    let (mock, _controller) = dynamic();
    let cadence = Cadence::builder().with_history(mock).build().unwrap();
    let data = cadence.gather_release_data().await.unwrap();
    assert_eq!(data, ReleaseData::default());
    assert_eq!(serde_json::to_string(&data).unwrap(), r#"{"releases":[]}"#);
}

#[tokio::test]
async fn deployment_listing_failure_is_tagged() {
    let (mock, controller) = dynamic();
    controller
        .set_deployments_behavior(MockBehavior::Fail(CadenceError::Other("api down".into())))
        .await;
    let cadence = Cadence::builder().with_history(mock).build().unwrap();
    let err = cadence.gather_release_data().await.unwrap_err();
    assert!(
        matches!(err, CadenceError::DeploymentSource { ref source_name, .. } if source_name == "P0")
    );
}

#[tokio::test]
async fn unknown_revision_aborts_release_data() {
    let cadence = Cadence::builder()
        .with_commit_history(Arc::new(MockHistory::new()))
        .build()
        .unwrap();
    let err = cadence
        .release_data_for(&[deploy("c93e1aa", june(1)), deploy("deadbeef", june(2))])
        .await
        .unwrap_err();
    assert!(matches!(err, CadenceError::CommitLookup { ref revision, .. } if revision == "c93e1aa..deadbeef"));
}

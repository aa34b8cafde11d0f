use cadence_core::{CommitEvent, DeploymentEvent, Instant};
use chrono::NaiveDateTime;

/// Linear, merge-free commit log, oldest first: `(id, authored_at)`.
const COMMITS: &[(&str, &str)] = &[
    ("a1f3c2e", "2020-05-28T09:15:00"),
    ("b27d9e0", "2020-05-29T16:40:00"),
    ("c93e1aa", "2020-06-01T10:05:00"),
    ("d4410bf", "2020-06-02T11:30:00"),
    ("e5c2f71", "2020-06-04T08:20:00"),
    ("f6a8d03", "2020-06-05T14:55:00"),
    ("0a7b4c9", "2020-06-09T09:00:00"),
    ("1b8c5da", "2020-06-10T17:45:00"),
    ("2c9d6eb", "2020-06-15T12:10:00"),
    ("3dae7fc", "2020-06-18T10:00:00"),
    ("4ebf80d", "2020-06-22T15:35:00"),
    ("5fc091e", "2020-06-24T09:50:00"),
];

/// Deployments of the commit log above: `(deployed_commit, deployed_at)`.
const DEPLOYS: &[(&str, &str)] = &[
    ("c93e1aa", "2020-06-01T14:00:00"),
    ("d4410bf", "2020-06-02T18:00:00"),
    ("f6a8d03", "2020-06-07T18:00:00"),
    ("1b8c5da", "2020-06-11T09:30:00"),
    ("3dae7fc", "2020-06-18T18:00:00"),
    ("5fc091e", "2020-06-25T18:00:00"),
];

fn parse(s: &str) -> Instant {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .expect("fixture timestamps are valid")
        .and_utc()
}

pub fn commits() -> Vec<CommitEvent> {
    COMMITS
        .iter()
        .map(|&(id, at)| CommitEvent::new(id, parse(at)))
        .collect()
}

pub fn deployments() -> Vec<DeploymentEvent> {
    DEPLOYS
        .iter()
        .map(|&(id, at)| DeploymentEvent::new(id, parse(at)))
        .collect()
}

pub fn position(revision: &str) -> Option<usize> {
    COMMITS.iter().position(|&(id, _)| id == revision)
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An absolute point in time.
pub type Instant = DateTime<Utc>;

/// One release/deploy of the tracked project.
///
/// `id` identifies the revision that was deployed (typically a commit hash).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentEvent {
    /// Revision identifier of the deployed code.
    pub id: String,
    /// When the deployment happened.
    pub time_created: Instant,
}

impl DeploymentEvent {
    /// Build a deployment event.
    pub fn new(id: impl Into<String>, time_created: Instant) -> Self {
        Self {
            id: id.into(),
            time_created,
        }
    }
}

/// One non-merge change in version-control history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitEvent {
    /// Commit identifier.
    pub id: String,
    /// Commit author timestamp.
    pub time_created: Instant,
}

impl CommitEvent {
    /// Build a commit event.
    pub fn new(id: impl Into<String>, time_created: Instant) -> Self {
        Self {
            id: id.into(),
            time_created,
        }
    }
}

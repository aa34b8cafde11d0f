use async_trait::async_trait;

use crate::{CadenceError, CommitEvent, DeploymentEvent};

/// Upstream collaborator that lists the deployments of a project.
///
/// Implementations return genuine release events only, ascending by
/// `time_created`. Filtering out non-deploy releases (for example by matching
/// a description field) is the implementation's job.
#[async_trait]
pub trait DeploymentSource: Send + Sync {
    /// Stable, human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fetch every known deployment, oldest first.
    async fn deployments(&self) -> Result<Vec<DeploymentEvent>, CadenceError>;
}

/// Upstream collaborator backed by version-control history.
///
/// Both methods are read-only queries; callers may issue them concurrently.
#[async_trait]
pub trait CommitHistorySource: Send + Sync {
    /// Stable, human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Non-merge commits introduced between two deployments.
    ///
    /// With `to = Some(end)` this is the range `from..end`: commits reachable
    /// from `end` but not from `from` (strictly after `from`, up to and
    /// including `end`). With `to = None` it is every ancestor of `from`,
    /// including `from` itself.
    ///
    /// # Errors
    /// Implementations should report unresolvable revisions and process or
    /// network failures as `CadenceError::CommitLookup`.
    async fn commits_between(
        &self,
        from: &DeploymentEvent,
        to: Option<&DeploymentEvent>,
    ) -> Result<Vec<CommitEvent>, CadenceError>;

    /// Whether `revision` is present in the history.
    ///
    /// Callers treat an error as "not present"; it is only used for optional filtering.
    async fn exists(&self, revision: &str) -> Result<bool, CadenceError>;
}

/// Render the revision range a `commits_between` call asks for (`a..b` or `a`).
#[must_use]
pub fn revision_query(from: &DeploymentEvent, to: Option<&DeploymentEvent>) -> String {
    match to {
        Some(end) => format!("{}..{}", from.id, end.id),
        None => from.id.clone(),
    }
}

//! Mock collaborators for Cadence.
//!
//! - [`MockHistory`]: a fixed, linear commit log with six deployments in June
//!   2020. Deterministic and CI-safe; used by demos and scenario tests.
//! - [`DynamicMockHistory`]: behavior scripted per revision query through a
//!   [`DynamicMockController`], with request logging and in-flight tracking.
use async_trait::async_trait;
use cadence_core::connector::{CommitHistorySource, DeploymentSource};
use cadence_core::{CadenceError, CommitEvent, DeploymentEvent, revision_query};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockHistory, MockBehavior};

/// Fixture-backed deployment source and commit history.
///
/// Revision `"FAIL"` makes any lookup fail with `CommitLookup`; revision
/// `"TIMEOUT"` delays the lookup by 200ms before answering.
pub struct MockHistory;

impl Default for MockHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The fixture deployments, oldest first.
    #[must_use]
    pub fn fixture_deployments() -> Vec<DeploymentEvent> {
        fixtures::history::deployments()
    }

    /// The fixture commit log, oldest first.
    #[must_use]
    pub fn fixture_commits() -> Vec<CommitEvent> {
        fixtures::history::commits()
    }

    async fn maybe_fail_or_timeout(revision: &str, query: &str) -> Result<(), CadenceError> {
        match revision {
            "FAIL" => Err(CadenceError::commit_lookup(
                "cadence-mock",
                query,
                "forced failure",
            )),
            "TIMEOUT" => {
                // Keep short to avoid slowing tests excessively
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn resolve(revision: &str, query: &str) -> Result<usize, CadenceError> {
        fixtures::history::position(revision).ok_or_else(|| {
            CadenceError::commit_lookup("cadence-mock", query, "unknown revision")
        })
    }
}

#[async_trait]
impl DeploymentSource for MockHistory {
    fn name(&self) -> &'static str {
        "cadence-mock"
    }

    async fn deployments(&self) -> Result<Vec<DeploymentEvent>, CadenceError> {
        Ok(Self::fixture_deployments())
    }
}

#[async_trait]
impl CommitHistorySource for MockHistory {
    fn name(&self) -> &'static str {
        "cadence-mock"
    }

    /// Commits are returned oldest first.
    async fn commits_between(
        &self,
        from: &DeploymentEvent,
        to: Option<&DeploymentEvent>,
    ) -> Result<Vec<CommitEvent>, CadenceError> {
        let query = revision_query(from, to);
        Self::maybe_fail_or_timeout(&from.id, &query).await?;
        if let Some(end) = to {
            Self::maybe_fail_or_timeout(&end.id, &query).await?;
        }

        let from_idx = Self::resolve(&from.id, &query)?;
        let log = Self::fixture_commits();
        let range = match to {
            Some(end) => {
                let to_idx = Self::resolve(&end.id, &query)?;
                if to_idx <= from_idx {
                    return Ok(Vec::new());
                }
                from_idx + 1..to_idx + 1
            }
            None => 0..from_idx + 1,
        };
        Ok(log[range].to_vec())
    }

    async fn exists(&self, revision: &str) -> Result<bool, CadenceError> {
        Self::maybe_fail_or_timeout(revision, revision).await?;
        Ok(fixtures::history::position(revision).is_some())
    }
}

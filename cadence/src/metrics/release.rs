use cadence_core::{CadenceError, Change, CommitEvent, DeploymentEvent, Release, ReleaseData};

use crate::Cadence;
use crate::core::try_with_request_deadline;
use crate::metrics::util::try_join_ordered;

fn to_change(c: CommitEvent) -> Change {
    Change {
        timestamp: c.time_created,
        change_id: c.id,
    }
}

impl Cadence {
    /// Commits introduced by each deployment, in deployment order.
    ///
    /// The first deployment carries its whole ancestry; every later one the
    /// commits since its predecessor.
    ///
    /// # Errors
    /// The first lookup failure aborts; `RequestTimeout("release_data")` if the
    /// configured deadline expires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::release::release_data_for",
            skip(self, deployments),
            fields(deployments = deployments.len()),
        )
    )]
    pub async fn release_data_for(
        &self,
        deployments: &[DeploymentEvent],
    ) -> Result<ReleaseData, CadenceError> {
        let ranges = deployments.iter().enumerate().map(|(i, current)| {
            let (from, to) = match i.checked_sub(1) {
                Some(prev) => (&deployments[prev], Some(current)),
                None => (current, None),
            };
            Self::lookup_with_timeout(
                self.history.name(),
                "commits",
                self.cfg.lookup_timeout,
                self.history.commits_between(from, to),
            )
        });

        try_with_request_deadline("release_data", self.cfg.request_timeout, async {
            let commits = try_join_ordered(ranges, self.cfg.lookup_concurrency).await?;
            let releases = deployments
                .iter()
                .zip(commits)
                .map(|(d, cs)| Release {
                    timestamp: d.time_created,
                    release_id: d.id.clone(),
                    changes: cs.into_iter().map(to_change).collect(),
                })
                .collect();
            Ok(ReleaseData { releases })
        })
        .await
    }

    /// Fetch deployments from the registered source and resolve their changes.
    ///
    /// # Errors
    /// `MissingCollaborator` without a deployment source, `DeploymentSource`
    /// if listing fails, otherwise as [`Cadence::release_data_for`].
    pub async fn gather_release_data(&self) -> Result<ReleaseData, CadenceError> {
        let deployments = self.fetch_deployments().await?;
        self.release_data_for(&deployments).await
    }
}

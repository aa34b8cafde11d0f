use std::collections::HashMap;

use cadence_core::{CadenceError, DeploymentEvent, Interval, SeriesPoint};

use crate::Cadence;
use crate::core::try_with_request_deadline;
use crate::metrics::util::{join_ordered, try_join_ordered};

/// Deployments whose lead times are measured together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeployGroup<T> {
    /// A lone deployment, measured against its own ancestry.
    Single(T),
    /// Consecutive deployments `(previous, current)`.
    Pair(T, T),
}

impl<T> DeployGroup<T> {
    /// The deployment the commit range starts from.
    pub const fn start(&self) -> &T {
        match self {
            Self::Single(a) | Self::Pair(a, _) => a,
        }
    }

    /// The deployment the commit range ends at, if any.
    pub const fn end(&self) -> Option<&T> {
        match self {
            Self::Single(_) => None,
            Self::Pair(_, b) => Some(b),
        }
    }
}

impl<T: Clone> DeployGroup<T> {
    /// `[x]` for a single, `[a, b]` for a pair.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Self::Single(a) => vec![a.clone()],
            Self::Pair(a, b) => vec![a.clone(), b.clone()],
        }
    }
}

/// Group consecutive items for lead-time measurement.
///
/// Zero items give no groups, one item gives a single group, and `n >= 2`
/// items give the `n - 1` consecutive pairs.
///
/// ```
/// use cadence::{get_pairs, DeployGroup};
/// assert_eq!(get_pairs(&[1]), vec![DeployGroup::Single(1)]);
/// assert_eq!(
///     get_pairs(&[1, 2, 3]),
///     vec![DeployGroup::Pair(1, 2), DeployGroup::Pair(2, 3)],
/// );
/// ```
#[must_use]
pub fn get_pairs<T: Clone>(items: &[T]) -> Vec<DeployGroup<T>> {
    match items {
        [] => Vec::new(),
        [only] => vec![DeployGroup::Single(only.clone())],
        _ => items
            .windows(2)
            .map(|w| DeployGroup::Pair(w[0].clone(), w[1].clone()))
            .collect(),
    }
}

/// Arithmetic mean rounded half away from zero; `0` for no samples.
pub(crate) fn rounded_mean(samples: &[i64]) -> i64 {
    if samples.is_empty() {
        return 0;
    }
    let n = i128::try_from(samples.len()).unwrap_or(i128::MAX);
    let sum: i128 = samples.iter().copied().map(i128::from).sum();
    let (q, r) = (sum / n, sum % n);
    let mean = if 2 * r.abs() >= n { q + sum.signum() } else { q };
    i64::try_from(mean).unwrap_or(if mean < 0 { i64::MIN } else { i64::MAX })
}

fn deploys_in(window: &Interval, deployments: &[DeploymentEvent]) -> Vec<DeploymentEvent> {
    deployments
        .iter()
        .filter(|d| window.contains(d.time_created))
        .cloned()
        .collect()
}

impl Cadence {
    /// Lead-time samples (milliseconds) for the commits a deployment introduced.
    ///
    /// Queries commits strictly after `start` up to and including `end`, or
    /// every ancestor of `start` when `end` is `None`. Each sample is the
    /// release instant (`end`, else `start`) minus the commit instant.
    ///
    /// # Errors
    /// `CommitLookup` from the collaborator or `LookupTimeout` on expiry.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::lead_time::get_lead_times",
            skip(self, start, end),
            fields(range = %cadence_core::revision_query(start, end)),
        )
    )]
    pub async fn get_lead_times(
        &self,
        start: &DeploymentEvent,
        end: Option<&DeploymentEvent>,
    ) -> Result<Vec<i64>, CadenceError> {
        let commits = Self::lookup_with_timeout(
            self.history.name(),
            "commits",
            self.cfg.lookup_timeout,
            self.history.commits_between(start, end),
        )
        .await?;
        let released = end.map_or(start.time_created, |e| e.time_created);
        Ok(commits
            .iter()
            .map(|c| (released - c.time_created).num_milliseconds())
            .collect())
    }

    async fn lead_times_for_groups(
        &self,
        groups: &[DeployGroup<DeploymentEvent>],
    ) -> Result<Vec<Vec<i64>>, CadenceError> {
        try_join_ordered(
            groups.iter().map(|g| self.get_lead_times(g.start(), g.end())),
            self.cfg.lookup_concurrency,
        )
        .await
    }

    /// Mean lead time of the deployments inside one window.
    ///
    /// `deploys_in_window` must already be filtered to the window and sorted
    /// ascending. Always tagged with `window.end` in epoch milliseconds; zero
    /// samples give a value of `0`.
    ///
    /// # Errors
    /// The first lookup failure aborts the window.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::lead_time::calculate_mean_lead_time_for_window",
            skip(self, deploys_in_window),
            fields(window_end = %window.end(), deploys = deploys_in_window.len()),
        )
    )]
    pub async fn calculate_mean_lead_time_for_window(
        &self,
        window: &Interval,
        deploys_in_window: &[DeploymentEvent],
    ) -> Result<SeriesPoint<i64>, CadenceError> {
        let groups = get_pairs(deploys_in_window);
        let samples: Vec<i64> = self
            .lead_times_for_groups(&groups)
            .await?
            .into_iter()
            .flatten()
            .collect();
        Ok(SeriesPoint(window.end_millis(), rounded_mean(&samples)))
    }

    /// Existence check that never fails: errors resolve to `false`.
    async fn exists_or_absent(&self, revision: &str) -> bool {
        match Self::lookup_with_timeout(
            self.history.name(),
            "exists",
            self.cfg.lookup_timeout,
            self.history.exists(revision),
        )
        .await
        {
            Ok(found) => found,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(revision, error = %err, "existence check failed; treating deployment as absent");
                #[cfg(not(feature = "tracing"))]
                let _ = err;
                false
            }
        }
    }

    /// Keep only the deployments the commit history knows about.
    ///
    /// A no-op when `verify_deployments` is disabled.
    pub async fn verified_deployments(
        &self,
        deployments: &[DeploymentEvent],
    ) -> Vec<DeploymentEvent> {
        if !self.cfg.verify_deployments {
            return deployments.to_vec();
        }
        let known = join_ordered(
            deployments.iter().map(|d| self.exists_or_absent(&d.id)),
            self.cfg.lookup_concurrency,
        )
        .await;
        deployments
            .iter()
            .zip(known)
            .filter_map(|(d, ok)| ok.then(|| d.clone()))
            .collect()
    }

    /// Mean lead time per window: one point per window, in window order.
    ///
    /// Deployments are optionally verified first, then selected per window
    /// with `[start, end)` containment. Pairs shared by overlapping windows
    /// are looked up once; lookups run with bounded concurrency.
    ///
    /// # Errors
    /// The first `CommitLookup` or `LookupTimeout` aborts the whole series.
    /// `RequestTimeout("lead_time")` if the configured deadline expires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::lead_time::calculate_average_lead_time",
            skip(self, deployments, windows),
            fields(deployments = deployments.len(), windows = windows.len()),
        )
    )]
    pub async fn calculate_average_lead_time(
        &self,
        deployments: &[DeploymentEvent],
        windows: &[Interval],
    ) -> Result<Vec<SeriesPoint<i64>>, CadenceError> {
        try_with_request_deadline("lead_time", self.cfg.request_timeout, async {
            let mut deployments = self.verified_deployments(deployments).await;
            deployments.sort_by_key(|d| d.time_created);

            // Unique groups in first-seen order, plus each window's group slots.
            let mut unique: Vec<DeployGroup<DeploymentEvent>> = Vec::new();
            let mut slot: HashMap<DeployGroup<DeploymentEvent>, usize> = HashMap::new();
            let mut per_window: Vec<Vec<usize>> = Vec::with_capacity(windows.len());
            for w in windows {
                let mut idxs = Vec::new();
                for g in get_pairs(&deploys_in(w, &deployments)) {
                    let i = *slot.entry(g.clone()).or_insert(unique.len());
                    if i == unique.len() {
                        unique.push(g);
                    }
                    idxs.push(i);
                }
                per_window.push(idxs);
            }

            let resolved = self.lead_times_for_groups(&unique).await?;

            Ok(windows
                .iter()
                .zip(per_window)
                .map(|(w, idxs)| {
                    let samples: Vec<i64> = idxs
                        .iter()
                        .flat_map(|&i| resolved[i].iter().copied())
                        .collect();
                    SeriesPoint(w.end_millis(), rounded_mean(&samples))
                })
                .collect())
        })
        .await
    }
}

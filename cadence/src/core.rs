use std::sync::Arc;
use std::time::Duration;

use cadence_core::{
    CadenceConfig, CadenceError, CommitHistorySource, DeploymentSource, FrequencyMethod,
};

/// Orchestrator that computes delivery metrics from injected collaborators.
pub struct Cadence {
    pub(crate) deployments: Option<Arc<dyn DeploymentSource>>,
    pub(crate) history: Arc<dyn CommitHistorySource>,
    pub(crate) cfg: CadenceConfig,
}

/// Builder for constructing a `Cadence` orchestrator with custom configuration.
pub struct CadenceBuilder {
    deployments: Option<Arc<dyn DeploymentSource>>,
    history: Option<Arc<dyn CommitHistorySource>>,
    cfg: CadenceConfig,
}

impl Default for CadenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CadenceBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 8 lookups in flight, 30s per lookup, no overall deadline,
    /// deployments verified against history, best-mean frequency estimation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deployments: None,
            history: None,
            cfg: CadenceConfig::default(),
        }
    }

    /// Register the deployment source used by report generation and release data.
    ///
    /// Optional: lead-time and frequency computations over caller-supplied
    /// deployments work without one.
    #[must_use]
    pub fn with_deployment_source(mut self, source: Arc<dyn DeploymentSource>) -> Self {
        self.deployments = Some(source);
        self
    }

    /// Register the commit-history collaborator. Required.
    #[must_use]
    pub fn with_commit_history(mut self, history: Arc<dyn CommitHistorySource>) -> Self {
        self.history = Some(history);
        self
    }

    /// Register one collaborator for both roles.
    #[must_use]
    pub fn with_history<H>(self, history: Arc<H>) -> Self
    where
        H: DeploymentSource + CommitHistorySource + 'static,
    {
        let deployments: Arc<dyn DeploymentSource> = history.clone();
        self.with_deployment_source(deployments)
            .with_commit_history(history)
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CadenceConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum number of commit-history lookups in flight at once.
    #[must_use]
    pub const fn lookup_concurrency(mut self, n: usize) -> Self {
        self.cfg.lookup_concurrency = n;
        self
    }

    /// Timeout applied to every individual collaborator call.
    ///
    /// Expiry surfaces as `LookupTimeout` and aborts the computation.
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.lookup_timeout = timeout;
        self
    }

    /// Set an overall deadline for lead-time series and release-data gathering.
    ///
    /// When exceeded, returns a `RequestTimeout` error for the computation.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Toggle the existence pre-filter on deployments before lead-time lookups.
    #[must_use]
    pub const fn verify_deployments(mut self, yes: bool) -> Self {
        self.cfg.verify_deployments = yes;
        self
    }

    /// Select the estimator for the deployment-frequency series.
    #[must_use]
    pub const fn frequency_method(mut self, method: FrequencyMethod) -> Self {
        self.cfg.frequency_method = method;
        self
    }

    /// Build the `Cadence` orchestrator.
    ///
    /// # Errors
    /// Returns `MissingCollaborator` if no commit history was registered and
    /// `InvalidArg` if the configuration is invalid.
    pub fn build(self) -> Result<Cadence, CadenceError> {
        self.cfg.validate()?;
        let history = self.history.ok_or_else(|| {
            CadenceError::missing_collaborator(
                "commit history; add one via with_commit_history(...)",
            )
        })?;
        Ok(Cadence {
            deployments: self.deployments,
            history,
            cfg: self.cfg,
        })
    }
}

/// Apply an optional deadline to a whole computation.
///
/// On expiry returns `RequestTimeout("request")`; call sites remap the label.
pub(crate) async fn with_request_deadline<F>(
    deadline: Option<Duration>,
    fut: F,
) -> Result<F::Output, CadenceError>
where
    F: core::future::Future,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| CadenceError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

/// Like `with_request_deadline`, for fallible futures, with a capability label.
pub(crate) async fn try_with_request_deadline<T, F>(
    capability: &'static str,
    deadline: Option<Duration>,
    fut: F,
) -> Result<T, CadenceError>
where
    F: core::future::Future<Output = Result<T, CadenceError>>,
{
    match with_request_deadline(deadline, fut).await {
        Ok(inner) => inner,
        Err(CadenceError::RequestTimeout { .. }) => Err(CadenceError::request_timeout(capability)),
        Err(e) => Err(e),
    }
}

impl Cadence {
    /// Start building a new orchestrator.
    #[must_use]
    pub fn builder() -> CadenceBuilder {
        CadenceBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &CadenceConfig {
        &self.cfg
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "cadence::core::lookup_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn lookup_with_timeout<T, Fut>(
        source_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, CadenceError>
    where
        Fut: core::future::Future<Output = Result<T, CadenceError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CadenceError::lookup_timeout(source_name, capability)))
    }

    pub(crate) fn deployment_source(&self) -> Result<&Arc<dyn DeploymentSource>, CadenceError> {
        self.deployments.as_ref().ok_or_else(|| {
            CadenceError::missing_collaborator(
                "deployments; add one via with_deployment_source(...)",
            )
        })
    }

    /// Fetch every deployment from the registered source.
    ///
    /// # Errors
    /// `MissingCollaborator` without a source; upstream failures are tagged as
    /// `DeploymentSource` errors.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "cadence::core::fetch_deployments", skip(self))
    )]
    pub async fn fetch_deployments(
        &self,
    ) -> Result<Vec<cadence_core::DeploymentEvent>, CadenceError> {
        let source = self.deployment_source()?;
        let name = source.name();
        Self::lookup_with_timeout(name, "deployments", self.cfg.lookup_timeout, source.deployments())
            .await
            .map_err(|e| tag_deployment_err(name, e))
    }
}

/// Normalize a deployment-source failure into `CadenceError::DeploymentSource`.
///
/// Timeouts and errors that already name the deployment source pass through.
pub(crate) fn tag_deployment_err(source_name: &str, e: CadenceError) -> CadenceError {
    match e {
        e @ (CadenceError::DeploymentSource { .. }
        | CadenceError::LookupTimeout { .. }
        | CadenceError::RequestTimeout { .. }) => e,
        other => CadenceError::deployment_source(source_name, other.to_string()),
    }
}

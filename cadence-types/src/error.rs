use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the cadence workspace.
///
/// This covers invalid time spans, failures of the external deployment and
/// commit-history collaborators, deadline expiry, and configuration mistakes.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CadenceError {
    /// Two instants do not form a valid interval (out of order, equal, or unparsable).
    #[error("invalid interval: {reason}")]
    InvalidInterval {
        /// Human-readable explanation of why the interval was rejected.
        reason: String,
    },

    /// The commit-history collaborator could not resolve a revision range.
    #[error("{source_name} failed to resolve {revision}: {msg}")]
    CommitLookup {
        /// Name of the commit-history source that failed.
        source_name: String,
        /// Revision or revision range that was queried (e.g. `abc..def`).
        revision: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The deployment collaborator failed to produce a deployment list.
    #[error("{source_name} failed to list deployments: {msg}")]
    DeploymentSource {
        /// Name of the deployment source that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual collaborator call exceeded the configured timeout.
    #[error("lookup timed out: {capability} via {source_name}")]
    LookupTimeout {
        /// Name of the collaborator that timed out.
        source_name: String,
        /// Capability label (e.g. "commits", "exists", "deployments").
        capability: String,
    },

    /// The overall computation exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A required collaborator was not registered on the builder.
    #[error("missing collaborator: {capability}")]
    MissingCollaborator {
        /// Capability that has no registered collaborator.
        capability: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl CadenceError {
    /// Helper: build an `InvalidInterval` error from a reason.
    pub fn invalid_interval(reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            reason: reason.into(),
        }
    }

    /// Helper: build a `CommitLookup` error for a revision query.
    pub fn commit_lookup(
        source_name: impl Into<String>,
        revision: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::CommitLookup {
            source_name: source_name.into(),
            revision: revision.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `DeploymentSource` error.
    pub fn deployment_source(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::DeploymentSource {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `LookupTimeout` error.
    pub fn lookup_timeout(source_name: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::LookupTimeout {
            source_name: source_name.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build a `MissingCollaborator` error.
    #[must_use]
    pub fn missing_collaborator(capability: impl Into<String>) -> Self {
        Self::MissingCollaborator {
            capability: capability.into(),
        }
    }

    /// Returns true if this error came from talking to the commit-history collaborator.
    ///
    /// Timeouts of individual lookups are classified as lookup failures too.
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::CommitLookup { .. } | Self::LookupTimeout { .. })
    }
}

impl From<chrono::ParseError> for CadenceError {
    fn from(e: chrono::ParseError) -> Self {
        Self::invalid_interval(format!("unparsable instant: {e}"))
    }
}

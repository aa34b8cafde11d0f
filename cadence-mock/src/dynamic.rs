use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cadence_core::connector::{CommitHistorySource, DeploymentSource};
use cadence_core::{CadenceError, CommitEvent, DeploymentEvent, revision_query};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping for the given duration.
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(CadenceError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, CadenceError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delayed(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => std::future::pending().await,
        }
    }
}

#[derive(Default)]
struct InternalState {
    deployments: Option<MockBehavior<Vec<DeploymentEvent>>>,
    commit_rules: HashMap<String, MockBehavior<Vec<CommitEvent>>>,
    exists_rules: HashMap<String, MockBehavior<bool>>,
    commit_requests: Vec<String>,
    exists_requests: Vec<String>,
}

/// Count of `commits_between` calls in flight, with its high-water mark.
#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlightGuard(self)
    }
}

/// Leaves the in-flight count when the call finishes or is cancelled.
struct InFlightGuard<'a>(&'a InFlight);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    in_flight: Arc<InFlight>,
}

impl DynamicMockController {
    /// Set the behavior of `deployments`.
    pub async fn set_deployments_behavior(&self, behavior: MockBehavior<Vec<DeploymentEvent>>) {
        let mut guard = self.state.lock().await;
        guard.deployments = Some(behavior);
    }

    /// Set the behavior of `commits_between` for a revision query (`"a..b"` or `"a"`).
    pub async fn set_commits_behavior(
        &self,
        query: impl Into<String>,
        behavior: MockBehavior<Vec<CommitEvent>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.commit_rules.insert(query.into(), behavior);
    }

    /// Set the behavior of `exists` for a revision.
    pub async fn set_exists_behavior(&self, revision: impl Into<String>, behavior: MockBehavior<bool>) {
        let mut guard = self.state.lock().await;
        guard.exists_rules.insert(revision.into(), behavior);
    }

    /// Revision queries received by `commits_between`, in arrival order.
    pub async fn commit_requests(&self) -> Vec<String> {
        self.state.lock().await.commit_requests.clone()
    }

    /// Revisions received by `exists`, in arrival order.
    pub async fn exists_requests(&self) -> Vec<String> {
        self.state.lock().await.exists_requests.clone()
    }

    /// Highest number of `commits_between` calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.in_flight.peak.load(Ordering::SeqCst)
    }

    /// Number of `commits_between` calls currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.current.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
        self.in_flight
            .peak
            .store(self.in_flight.current.load(Ordering::SeqCst), Ordering::SeqCst);
    }
}

/// Collaborator that defers all behavior to an external controller.
///
/// Unconfigured inputs behave as follows: `deployments` returns an empty list,
/// `commits_between` fails with `CommitLookup`, and `exists` returns `true`.
pub struct DynamicMockHistory {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
    in_flight: Arc<InFlight>,
}

impl DynamicMockHistory {
    /// Create a new dynamic mock and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let in_flight = Arc::new(InFlight::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            in_flight: Arc::clone(&in_flight),
        };
        (
            Arc::new(Self {
                name,
                state,
                in_flight,
            }),
            controller,
        )
    }
}

#[async_trait]
impl DeploymentSource for DynamicMockHistory {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn deployments(&self) -> Result<Vec<DeploymentEvent>, CadenceError> {
        let behavior = {
            let guard = self.state.lock().await;
            guard.deployments.clone()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl CommitHistorySource for DynamicMockHistory {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn commits_between(
        &self,
        from: &DeploymentEvent,
        to: Option<&DeploymentEvent>,
    ) -> Result<Vec<CommitEvent>, CadenceError> {
        let query = revision_query(from, to);
        let _in_flight = self.in_flight.enter();
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.commit_requests.push(query.clone());
            guard.commit_rules.get(&query).cloned()
        };

        match behavior {
            Some(b) => b.run().await,
            None => Err(CadenceError::commit_lookup(
                self.name,
                query,
                "no behavior configured",
            )),
        }
    }

    async fn exists(&self, revision: &str) -> Result<bool, CadenceError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.exists_requests.push(revision.to_string());
            guard.exists_rules.get(revision).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Ok(true),
        }
    }
}

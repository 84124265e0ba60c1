//! Host-facing trait boundary.
//!
//! The surrounding CI host owns the real scheduler, queue, dependency graph,
//! and change detection. The engine consumes them through these narrow
//! contracts and never reaches past them.

use std::time::Duration;

use multibuild_core::PollingResult;

use crate::completion::CompletionHandle;
use crate::error::EngineError;
use crate::signal::RunActions;

/// Cause annotation recorded on a child submission, pointing back at the
/// parent run that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamCause {
    /// Identity of the triggering parent run.
    pub parent_run_id: String,
}

/// One item waiting in the host's pending queue.
#[derive(Debug, Clone)]
pub struct QueuedItem {
    /// Target job name.
    pub job: String,
    /// Run metadata attached at submission time.
    pub actions: RunActions,
    /// Completion handle returned from the submission.
    pub handle: CompletionHandle,
}

/// Exclusive view of the host's pending queue.
///
/// Obtained only through [`JobScheduler::with_queue`]; every mutation is
/// therefore serialized against the scheduler's own dequeue.
pub trait QueueView {
    /// All pending items targeting `job`.
    fn pending_items(&self, job: &str) -> Vec<QueuedItem>;

    /// Remove `item` from the queue and mark its completion handle
    /// cancelled. Returns `false` when the item was no longer queued.
    fn cancel(&mut self, item: &QueuedItem) -> bool;
}

/// The host's build scheduler.
pub trait JobScheduler: Send + Sync {
    /// Submit `job` for execution after `quiet_period`, annotated with the
    /// upstream cause and the given actions. Never blocks; the returned
    /// handle resolves once the build finishes.
    fn submit(
        &self,
        job: &str,
        quiet_period: Duration,
        cause: UpstreamCause,
        actions: RunActions,
    ) -> CompletionHandle;

    /// Run `f` with exclusive access to the pending queue.
    ///
    /// The scheduler holds its queue lock for the duration of the call, so
    /// `f` must not block.
    fn with_queue(&self, f: &mut dyn FnMut(&mut dyn QueueView));
}

/// Read access to the host's dependency graph.
pub trait DependencyGraph: Send + Sync {
    /// Downstream dependents of `project`, in the host's reported order.
    /// The order is significant for polling reproducibility.
    fn downstream_of(&self, project: &str) -> Vec<String>;
}

/// The host's default (non-aggregating) change detection.
pub trait ChangePoller: Send + Sync {
    /// Poll `project` for changes since its last build.
    fn poll(&self, project: &str) -> Result<PollingResult, EngineError>;
}

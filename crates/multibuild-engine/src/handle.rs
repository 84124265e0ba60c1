//! Sub-job lifecycle handle.
//!
//! A [`SubJobHandle`] tracks one child job triggered by a parent run: its
//! trigger parameters, the completion handle returned by the scheduler, its
//! per-handle cancel flag, and the observed terminal result. Once terminal
//! or cancelled a handle is immutable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use multibuild_core::BuildResult;
use tracing::debug;

use crate::completion::CompletionHandle;
use crate::error::EngineError;
use crate::host::{JobScheduler, UpstreamCause};
use crate::signal::{OrchestrationSignal, RunActions};

/// The tracked lifecycle of one triggered child job.
#[derive(Debug)]
pub struct SubJobHandle {
    /// Target child-job name. The job definition itself stays with the host.
    job: String,
    /// Quiet period to request at submission.
    quiet_period: Duration,
    /// Parent run recorded as the upstream cause.
    parent_run_id: String,
    /// Metadata attached to the triggered run, marker included.
    actions: RunActions,
    /// Owning orchestration's shared cancellation flag.
    signal: Arc<OrchestrationSignal>,
    /// Fixed at construction; callers skip scheduling when false.
    should_trigger: bool,
    /// Per-handle cancel flag.
    cancel: AtomicBool,
    /// Completion handle, attached at most once by `generate_future`.
    completion: OnceLock<CompletionHandle>,
    /// Observed terminal result; first write wins.
    result: OnceLock<BuildResult>,
}

impl SubJobHandle {
    pub(crate) fn new(
        job: String,
        quiet_period: Duration,
        parent_run_id: String,
        actions: RunActions,
        signal: Arc<OrchestrationSignal>,
        should_trigger: bool,
    ) -> Self {
        Self {
            job,
            quiet_period,
            parent_run_id,
            actions,
            signal,
            should_trigger,
            cancel: AtomicBool::new(false),
            completion: OnceLock::new(),
            result: OnceLock::new(),
        }
    }

    /// Target child-job name.
    pub fn job(&self) -> &str {
        &self.job
    }

    /// Whether the trigger condition held when the handle was created.
    pub fn should_trigger(&self) -> bool {
        self.should_trigger
    }

    /// Actions attached to the triggered run.
    pub fn actions(&self) -> &RunActions {
        &self.actions
    }

    /// Completion handle, once the job has been submitted.
    pub fn completion(&self) -> Option<&CompletionHandle> {
        self.completion.get()
    }

    /// Whether this handle is cancelled: its own cancel flag is set, or the
    /// completion handle reports cancellation. Pure read.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
            || self
                .completion
                .get()
                .is_some_and(CompletionHandle::is_cancelled)
    }

    /// Submit the child job to the host scheduler and attach the returned
    /// completion handle.
    ///
    /// Must be called at most once per handle; a second invocation is a
    /// caller error reported as [`EngineError::AlreadyScheduled`].
    pub fn generate_future(&self, scheduler: &dyn JobScheduler) -> Result<(), EngineError> {
        if self.completion.get().is_some() {
            return Err(EngineError::AlreadyScheduled {
                job: self.job.clone(),
            });
        }

        let handle = scheduler.submit(
            &self.job,
            self.quiet_period,
            UpstreamCause {
                parent_run_id: self.parent_run_id.clone(),
            },
            self.actions.clone(),
        );

        self.completion
            .set(handle)
            .map_err(|_| EngineError::AlreadyScheduled {
                job: self.job.clone(),
            })
    }

    /// Cancel this sub-job.
    ///
    /// Sets the per-handle cancel flag, raises the owning orchestration's
    /// shared flag, and — when a completion handle exists — removes any
    /// still-queued item for this job whose handle matches ours. The queue
    /// inspection runs under the scheduler's queue lock so it is atomic
    /// relative to the scheduler's own dequeue. With no completion handle
    /// yet, the physical queue-cancel step is skipped; the raised flags
    /// still block any later admission.
    pub fn cancel_job(&self, scheduler: &dyn JobScheduler) {
        self.cancel.store(true, Ordering::SeqCst);
        self.signal.request_cancel();

        let Some(handle) = self.completion.get() else {
            debug!(job = %self.job, "Cancel requested before submission; nothing queued to remove");
            return;
        };

        scheduler.with_queue(&mut |queue| {
            for item in queue.pending_items(&self.job) {
                if item.handle.same_as(handle) {
                    queue.cancel(&item);
                    debug!(job = %self.job, "Removed cancelled sub-job from pending queue");
                }
            }
        });
    }

    /// Record the observed terminal result. The first recorded result wins.
    pub fn set_result(&self, result: BuildResult) {
        let _ = self.result.set(result);
    }

    /// Observed terminal result, once known.
    pub fn result(&self) -> Option<BuildResult> {
        self.result.get().copied()
    }
}

//! Parent-run orchestration state.
//!
//! An [`Orchestration`] owns the ordered set of sub-job handles created for
//! one parent run plus the shared cancellation signal. Handles and the two
//! host hooks only ever hold non-owning references back to the signal, so
//! there is no ownership cycle: the orchestration owns down, everything else
//! points back up through the marker.

use std::sync::Arc;
use std::time::Duration;

use multibuild_core::BuildResult;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::EngineError;
use crate::handle::SubJobHandle;
use crate::host::JobScheduler;
use crate::signal::{OrchestrationMarker, OrchestrationSignal, RunActions};

/// One parent run coordinating a set of triggered child job executions.
///
/// Created when the parent build starts, dropped when it finishes; dropping
/// it invalidates every marker that pointed at it.
#[derive(Debug)]
pub struct Orchestration {
    id: String,
    parent_run_id: String,
    signal: Arc<OrchestrationSignal>,
    handles: Vec<Arc<SubJobHandle>>,
}

impl Orchestration {
    /// Create an orchestration for the given parent run.
    pub fn new(parent_run_id: impl Into<String>) -> Self {
        let parent_run_id = parent_run_id.into();
        let id = Uuid::new_v4().to_string();
        debug!(orchestration_id = %id, parent_run_id = %parent_run_id, "Orchestration created");
        Self {
            id,
            parent_run_id,
            signal: Arc::new(OrchestrationSignal::new()),
            handles: Vec::new(),
        }
    }

    /// Orchestration identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Parent run this orchestration belongs to.
    pub fn parent_run_id(&self) -> &str {
        &self.parent_run_id
    }

    /// Whether cancellation has been requested for this orchestration.
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Marker to attach to child submissions: a non-owning back-reference
    /// to this orchestration's cancellation signal.
    pub fn marker(&self) -> OrchestrationMarker {
        OrchestrationMarker::new(self.id.clone(), &self.signal)
    }

    /// Create and register a handle for one configured child job.
    ///
    /// The orchestration marker is stamped into the handle's actions here,
    /// so every submission made through the handle is traceable back to
    /// this orchestration by the gate and the listener.
    pub fn add_sub_job(
        &mut self,
        job: impl Into<String>,
        quiet_period: Duration,
        mut actions: RunActions,
        should_trigger: bool,
    ) -> Arc<SubJobHandle> {
        actions.push(self.marker());
        let handle = Arc::new(SubJobHandle::new(
            job.into(),
            quiet_period,
            self.parent_run_id.clone(),
            actions,
            Arc::clone(&self.signal),
            should_trigger,
        ));
        self.handles.push(Arc::clone(&handle));
        handle
    }

    /// Registered handles, in creation order.
    pub fn handles(&self) -> &[Arc<SubJobHandle>] {
        &self.handles
    }

    /// Submit every handle whose trigger condition held; the rest are
    /// skipped entirely.
    pub fn enqueue(&self, scheduler: &dyn JobScheduler) -> Result<(), EngineError> {
        for handle in &self.handles {
            if !handle.should_trigger() {
                debug!(job = %handle.job(), "Skipping sub-job: trigger condition was false");
                continue;
            }
            handle.generate_future(scheduler)?;
        }
        Ok(())
    }

    /// Wait for every triggered sub-job to reach a terminal state, record
    /// each result on its handle, and return the worst result observed.
    ///
    /// Handles that were never submitted settle as aborted only when their
    /// cancel flag was raised; otherwise they do not contribute. An empty
    /// orchestration settles as success.
    pub async fn settle(&self) -> BuildResult {
        let mut worst = BuildResult::Success;
        for handle in &self.handles {
            let Some(completion) = handle.completion() else {
                if handle.is_cancelled() {
                    handle.set_result(BuildResult::Aborted);
                    worst = worst.worse_of(BuildResult::Aborted);
                }
                continue;
            };
            let result = completion.wait().await;
            handle.set_result(result);
            worst = worst.worse_of(result);
        }

        info!(
            orchestration_id = %self.id,
            parent_run_id = %self.parent_run_id,
            result = %worst,
            "Orchestration settled"
        );
        worst
    }
}

//! Failure propagation from completed builds.
//!
//! Consulted by the host once per completed build, whether or not that
//! build belongs to an orchestration. A non-success result whose run carries
//! an orchestration marker raises the owning orchestration's cancellation
//! flag; this is the sole signal by which a child failure reaches siblings
//! still in the queue.

use multibuild_core::BuildResult;
use tracing::{debug, info};

use crate::signal::RunActions;

/// A build the host has just completed.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    /// Job the build belonged to.
    pub job: String,
    /// Terminal result.
    pub result: BuildResult,
    /// Run metadata attached at submission time.
    pub actions: RunActions,
}

/// Completion hook raising the orchestration cancel flag on child failure.
///
/// Stateless; idempotent (the flag is monotonic). Faults while resolving
/// the marker are swallowed so the host's build-completion pipeline is
/// never destabilized.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailurePropagationListener;

impl FailurePropagationListener {
    /// Create the listener.
    pub const fn new() -> Self {
        Self
    }

    /// Observe one completed build.
    pub fn on_completed(&self, run: &CompletedRun) {
        if run.result.is_success() {
            return;
        }

        let Some(marker) = run.actions.marker() else {
            return;
        };

        let Some(signal) = marker.signal() else {
            debug!(
                job = %run.job,
                orchestration_id = %marker.orchestration_id(),
                "Completed run's orchestration is gone; nothing to cancel"
            );
            return;
        };

        if !signal.is_cancelled() {
            info!(
                job = %run.job,
                result = %run.result,
                orchestration_id = %marker.orchestration_id(),
                "Child build did not succeed; cancelling orchestration"
            );
        }
        signal.request_cancel();
    }
}

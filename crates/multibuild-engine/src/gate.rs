//! Admission gate for queued sub-jobs.
//!
//! Consulted by the host scheduler once per candidate item per scheduling
//! pass, before the item is placed on an executor. The gate is a stateless
//! service object registered once at process start; all context arrives as
//! explicit arguments.

use tracing::{debug, info};

use crate::host::{QueueView, QueuedItem};

/// Cause string surfaced to the host when a queued item is blocked.
pub const BLOCKED_CAUSE: &str = "some builds aborted";

/// Outcome of one admission evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Defer to the host's default admission policy.
    NoOpinion,
    /// Do not place the item on an executor; `cause` is human-readable.
    Blocked {
        /// Why the item was blocked.
        cause: String,
    },
}

impl AdmissionDecision {
    /// Whether the decision blocks execution.
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Admission hook that rejects queued items belonging to a cancelled
/// orchestration.
///
/// Evaluation must never destabilize scheduling: any fault while resolving
/// an item's orchestration marker (absent, malformed, or pointing at a
/// torn-down orchestration) is swallowed and treated as no opinion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationGate;

impl CancellationGate {
    /// Create the gate.
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate one candidate item.
    ///
    /// `queue` is the host's already-locked pending queue for this
    /// scheduling pass. When the item's orchestration is cancelled the item
    /// is removed from the queue outright — not merely blocked — so it is
    /// never re-evaluated.
    pub fn can_take(&self, queue: &mut dyn QueueView, item: &QueuedItem) -> AdmissionDecision {
        let Some(marker) = item.actions.marker() else {
            return AdmissionDecision::NoOpinion;
        };

        let Some(signal) = marker.signal() else {
            debug!(
                job = %item.job,
                orchestration_id = %marker.orchestration_id(),
                "Orchestration marker no longer resolvable; deferring to default admission"
            );
            return AdmissionDecision::NoOpinion;
        };

        if !signal.is_cancelled() {
            return AdmissionDecision::NoOpinion;
        }

        queue.cancel(item);
        info!(
            job = %item.job,
            orchestration_id = %marker.orchestration_id(),
            "Removed queued sub-job: orchestration was cancelled"
        );
        AdmissionDecision::Blocked {
            cause: BLOCKED_CAUSE.to_string(),
        }
    }
}

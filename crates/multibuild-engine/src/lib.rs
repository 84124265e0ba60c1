//! Multibuild orchestration engine.
//!
//! Lets one parent build trigger, track, and on failure cancel a set of
//! dependent child builds inside a larger CI host:
//!
//! - [`SubJobHandle`]: the tracked lifecycle of one triggered child job.
//! - [`Orchestration`]: one parent run coordinating its sub-job handles and
//!   the shared cancellation flag.
//! - [`CancellationGate`]: admission hook that blocks and removes queued
//!   items once their orchestration has been cancelled.
//! - [`FailurePropagationListener`]: completion hook that converts a child
//!   failure into a cancellation signal for the whole parent run.
//! - [`PollingAggregator`]: folds change-detection results across the
//!   downstream dependency fan-out with early exit.
//!
//! The host's scheduler, dependency graph, and default polling are consumed
//! through the narrow trait contracts in [`host`].

pub mod completion;
pub mod error;
pub mod gate;
pub mod handle;
pub mod host;
pub mod listener;
pub mod orchestration;
pub mod polling;
pub mod signal;

#[cfg(test)]
mod testhost;

pub use completion::{CompletionHandle, CompletionResolver};
pub use error::EngineError;
pub use gate::{AdmissionDecision, BLOCKED_CAUSE, CancellationGate};
pub use handle::SubJobHandle;
pub use host::{ChangePoller, DependencyGraph, JobScheduler, QueueView, QueuedItem, UpstreamCause};
pub use listener::{CompletedRun, FailurePropagationListener};
pub use orchestration::Orchestration;
pub use polling::PollingAggregator;
pub use signal::{OrchestrationMarker, OrchestrationSignal, RunActions};

//! Errors from the orchestration engine.

use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Hook evaluation (admission gate, completion listener) never returns an
/// error; faults there are swallowed so the host pipeline stays stable.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `generate_future` was invoked twice on the same handle.
    #[error("Sub-job '{job}' was already submitted to the scheduler")]
    AlreadyScheduled { job: String },

    /// The host's default change-detection poll failed.
    #[error("Change polling failed for '{project}': {reason}")]
    PollFailed { project: String, reason: String },
}

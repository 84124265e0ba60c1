//! Shared cancellation signal and the orchestration marker.
//!
//! The signal is the single piece of cross-cutting mutable state in the
//! engine: a monotonic boolean raised once and never reset. Handles, the
//! admission gate, and the completion listener only ever reach it through a
//! non-owning [`OrchestrationMarker`] back-reference, so the generic host
//! pipeline never owns orchestration state.

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Shared cancellation flag for one orchestration.
///
/// Readers never block, writers never wait; the flag is monotonic (once
/// true, no engine operation resets it).
#[derive(Debug, Default)]
pub struct OrchestrationSignal {
    cancelled: AtomicBool,
}

impl OrchestrationSignal {
    /// Create an un-cancelled signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the cancellation flag. Idempotent.
    pub fn request_cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Run metadata identifying the orchestration a submission belongs to.
///
/// Carries a `Weak` back-reference: the marker never keeps an orchestration
/// alive, and a marker whose orchestration is gone simply fails to resolve.
#[derive(Debug, Clone)]
pub struct OrchestrationMarker {
    orchestration_id: String,
    signal: Weak<OrchestrationSignal>,
}

impl OrchestrationMarker {
    pub(crate) fn new(orchestration_id: String, signal: &Arc<OrchestrationSignal>) -> Self {
        Self {
            orchestration_id,
            signal: Arc::downgrade(signal),
        }
    }

    /// Identity of the owning orchestration.
    pub fn orchestration_id(&self) -> &str {
        &self.orchestration_id
    }

    /// Resolve the owning orchestration's cancellation signal.
    ///
    /// `None` when the orchestration has already been torn down; callers
    /// treat that the same as a missing marker.
    pub fn signal(&self) -> Option<Arc<OrchestrationSignal>> {
        self.signal.upgrade()
    }
}

/// Opaque action payload attached to a submitted run.
///
/// The host treats actions as uninterpreted metadata; consumers look up the
/// action type they care about by downcast, so an action of unexpected
/// shape is indistinguishable from an absent one.
#[derive(Clone, Default)]
pub struct RunActions {
    actions: Vec<Arc<dyn Any + Send + Sync>>,
}

impl RunActions {
    /// Empty action list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an action.
    pub fn push<T: Any + Send + Sync>(&mut self, action: T) {
        self.actions.push(Arc::new(action));
    }

    /// First action of type `T`, if any.
    pub fn find<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.actions
            .iter()
            .find_map(|action| Arc::clone(action).downcast::<T>().ok())
    }

    /// The orchestration marker, if one was attached.
    pub fn marker(&self) -> Option<Arc<OrchestrationMarker>> {
        self.find()
    }

    /// Number of attached actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions are attached.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for RunActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunActions")
            .field("len", &self.actions.len())
            .finish()
    }
}

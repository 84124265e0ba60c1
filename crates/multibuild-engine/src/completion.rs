//! Completion handles for submitted child builds.
//!
//! The host scheduler returns a [`CompletionHandle`] from every submission
//! and keeps the matching [`CompletionResolver`]. The handle side never
//! blocks except in the explicit `wait` call; the cancelled flag is a plain
//! atomic read so admission hooks can consult it from arbitrary threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use multibuild_core::BuildResult;
use tokio::sync::watch;

#[derive(Debug)]
struct Shared {
    cancelled: AtomicBool,
}

/// Handle to a submitted child build, resolved asynchronously by the host
/// scheduler once the build finishes (or is cancelled while still queued).
///
/// Clones share the same underlying state; [`CompletionHandle::same_as`]
/// compares that identity, which is how `cancel_job` matches queue items
/// back to the handle it holds.
#[derive(Debug, Clone)]
pub struct CompletionHandle {
    shared: Arc<Shared>,
    result: watch::Receiver<Option<BuildResult>>,
}

/// Resolver side of a [`CompletionHandle`], held by the host scheduler.
#[derive(Debug)]
pub struct CompletionResolver {
    shared: Arc<Shared>,
    result: watch::Sender<Option<BuildResult>>,
}

impl CompletionHandle {
    /// Create a connected handle/resolver pair.
    pub fn pair() -> (Self, CompletionResolver) {
        let shared = Arc::new(Shared {
            cancelled: AtomicBool::new(false),
        });
        let (tx, rx) = watch::channel(None);
        (
            Self {
                shared: Arc::clone(&shared),
                result: rx,
            },
            CompletionResolver { shared, result: tx },
        )
    }

    /// Whether the submission was cancelled while still queued.
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Terminal result, if already known. Never blocks.
    pub fn try_result(&self) -> Option<BuildResult> {
        *self.result.borrow()
    }

    /// Wait for the terminal result.
    ///
    /// Returns [`BuildResult::Aborted`] if the resolver was dropped without
    /// ever resolving (the submission can no longer finish).
    pub async fn wait(&self) -> BuildResult {
        let mut rx = self.result.clone();
        match rx.wait_for(Option::is_some).await {
            Ok(result) => result.unwrap_or(BuildResult::Aborted),
            Err(_) => BuildResult::Aborted,
        }
    }

    /// Whether `other` refers to the same submission.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl CompletionResolver {
    /// Resolve the handle with a terminal result. The first terminal result
    /// wins; later calls are ignored.
    pub fn resolve(&self, result: BuildResult) {
        self.result.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(result);
            true
        });
    }

    /// Mark the submission cancelled-while-queued and resolve it as aborted.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::SeqCst);
        self.resolve(BuildResult::Aborted);
    }
}

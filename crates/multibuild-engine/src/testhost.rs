//! In-memory host fakes shared by the engine tests: a scheduler with a
//! mutexed pending queue, a scripted change poller with call counting, and a
//! static dependency graph.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use multibuild_core::PollingResult;

use crate::completion::{CompletionHandle, CompletionResolver};
use crate::error::EngineError;
use crate::gate::{AdmissionDecision, CancellationGate};
use crate::host::{ChangePoller, DependencyGraph, JobScheduler, QueueView, QueuedItem, UpstreamCause};
use crate::signal::RunActions;

/// One recorded `submit` call.
#[derive(Debug, Clone)]
pub(crate) struct SubmissionRecord {
    pub job: String,
    pub quiet_period: Duration,
    pub cause: UpstreamCause,
}

struct PendingEntry {
    item: QueuedItem,
    resolver: CompletionResolver,
}

#[derive(Default)]
struct QueueState {
    entries: Vec<PendingEntry>,
}

impl QueueView for QueueState {
    fn pending_items(&self, job: &str) -> Vec<QueuedItem> {
        self.entries
            .iter()
            .filter(|entry| entry.item.job == job)
            .map(|entry| entry.item.clone())
            .collect()
    }

    fn cancel(&mut self, item: &QueuedItem) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|entry| entry.item.handle.same_as(&item.handle))
        else {
            return false;
        };
        let entry = self.entries.remove(pos);
        entry.resolver.cancel();
        true
    }
}

/// In-memory stand-in for the host scheduler.
#[derive(Default)]
pub(crate) struct TestScheduler {
    queue: Mutex<QueueState>,
    submissions: Mutex<Vec<SubmissionRecord>>,
}

impl TestScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit without caring about cause or quiet period.
    pub fn submit_plain(&self, job: &str, actions: RunActions) -> CompletionHandle {
        self.submit(
            job,
            Duration::ZERO,
            UpstreamCause {
                parent_run_id: "test-parent".to_string(),
            },
            actions,
        )
    }

    pub fn submissions(&self) -> Vec<SubmissionRecord> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn pending_count(&self, job: &str) -> usize {
        self.queue.lock().unwrap().pending_items(job).len()
    }

    /// Cancel every pending item for `job` from the host side.
    pub fn cancel_all_pending(&self, job: &str) {
        let mut state = self.queue.lock().unwrap();
        for item in state.pending_items(job) {
            state.cancel(&item);
        }
    }

    /// Dequeue the first pending item for `job` as if an executor picked it
    /// up, handing back the resolver so the test can finish the build.
    pub fn start_next(&self, job: &str) -> Option<CompletionResolver> {
        let mut state = self.queue.lock().unwrap();
        let pos = state.entries.iter().position(|entry| entry.item.job == job)?;
        Some(state.entries.remove(pos).resolver)
    }

    /// One scheduling pass: consult the gate for every queued item, in
    /// queue order, under the queue lock — the way the host would before
    /// assigning executors.
    pub fn dispatch_pass(&self, gate: &CancellationGate) -> Vec<AdmissionDecision> {
        let mut state = self.queue.lock().unwrap();
        let items: Vec<QueuedItem> = state
            .entries
            .iter()
            .map(|entry| entry.item.clone())
            .collect();
        items
            .iter()
            .map(|item| gate.can_take(&mut *state, item))
            .collect()
    }
}

impl JobScheduler for TestScheduler {
    fn submit(
        &self,
        job: &str,
        quiet_period: Duration,
        cause: UpstreamCause,
        actions: RunActions,
    ) -> CompletionHandle {
        let (handle, resolver) = CompletionHandle::pair();
        self.submissions.lock().unwrap().push(SubmissionRecord {
            job: job.to_string(),
            quiet_period,
            cause,
        });
        self.queue.lock().unwrap().entries.push(PendingEntry {
            item: QueuedItem {
                job: job.to_string(),
                actions,
                handle: handle.clone(),
            },
            resolver,
        });
        handle
    }

    fn with_queue(&self, f: &mut dyn FnMut(&mut dyn QueueView)) {
        let mut state = self.queue.lock().unwrap();
        f(&mut *state);
    }
}

/// Change poller returning scripted results and counting calls.
#[derive(Default)]
pub(crate) struct ScriptedPoller {
    results: HashMap<String, PollingResult>,
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, project: &str, result: PollingResult) -> Self {
        self.results.insert(project.to_string(), result);
        self
    }

    pub fn failing(mut self, project: &str) -> Self {
        self.failures.insert(project.to_string());
        self
    }

    pub fn call_count(&self, project: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| *p == project)
            .count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ChangePoller for ScriptedPoller {
    fn poll(&self, project: &str) -> Result<PollingResult, EngineError> {
        self.calls.lock().unwrap().push(project.to_string());
        if self.failures.contains(project) {
            return Err(EngineError::PollFailed {
                project: project.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self
            .results
            .get(project)
            .copied()
            .unwrap_or(PollingResult::no_changes()))
    }
}

/// Fixed dependency graph.
#[derive(Default)]
pub(crate) struct StaticGraph {
    downstream: HashMap<String, Vec<String>>,
}

impl StaticGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, project: &str, dependents: &[&str]) -> Self {
        self.downstream.insert(
            project.to_string(),
            dependents.iter().map(ToString::to_string).collect(),
        );
        self
    }
}

impl DependencyGraph for StaticGraph {
    fn downstream_of(&self, project: &str) -> Vec<String> {
        self.downstream.get(project).cloned().unwrap_or_default()
    }
}

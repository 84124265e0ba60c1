//! Change-detection aggregation across the downstream fan-out.
//!
//! When a parent project is configured to poll its sub-jobs, its own poll
//! result is folded with those of its downstream dependents: a greedy search
//! in the host's dependency order that stops at the first result with actual
//! changes. Dependent polls are deliberately sequential — the early exit
//! must stay deterministic and cost-bounded.

use std::sync::Arc;

use multibuild_core::{PollingResult, ProjectConfig};
use tracing::debug;

use crate::error::EngineError;
use crate::host::{ChangePoller, DependencyGraph};

/// Aggregates polling results over a project's downstream dependents.
pub struct PollingAggregator {
    poller: Arc<dyn ChangePoller>,
    graph: Arc<dyn DependencyGraph>,
}

impl PollingAggregator {
    /// Create an aggregator over the host's default poller and dependency
    /// graph.
    pub fn new(poller: Arc<dyn ChangePoller>, graph: Arc<dyn DependencyGraph>) -> Self {
        Self { poller, graph }
    }

    /// Poll `project`, folding in downstream dependents when configured.
    ///
    /// With `poll_subjobs` off this is exactly the default poll — no
    /// dependent is ever visited. Otherwise the project's own result wins
    /// immediately when it has changes; dependents are then polled in host
    /// order, keeping the most severe result seen and returning as soon as
    /// one has actual changes.
    pub fn poll(
        &self,
        project: &str,
        config: &ProjectConfig,
    ) -> Result<PollingResult, EngineError> {
        // Preserve default behavior unless configured otherwise.
        if !config.poll_subjobs {
            return self.poller.poll(project);
        }

        let mut result = self.poller.poll(project)?;
        // If the parent has changes, save the effort of checking children.
        if result.has_changes() {
            return Ok(result);
        }

        for dependent in self.graph.downstream_of(project) {
            let dependent_result = self.poller.poll(&dependent)?;
            if result.change < dependent_result.change {
                result = dependent_result;
                if result.has_changes() {
                    debug!(
                        project,
                        dependent = %dependent,
                        "Downstream dependent has changes; stopping sub-job poll early"
                    );
                    return Ok(result);
                }
            }
        }
        Ok(result)
    }
}

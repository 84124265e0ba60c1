//! Terminal build results.
//!
//! [`BuildResult`] is the terminal outcome the host reports for a finished
//! build. The variants are ordered best-first so orchestration code can fold
//! a set of child outcomes into the worst one seen with `Ord::max`.

use serde::{Deserialize, Serialize};

/// Terminal result of one build, best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildResult {
    /// Build finished and everything passed.
    Success,
    /// Build finished but was marked unstable (e.g. test failures).
    Unstable,
    /// Build ran and failed.
    Failure,
    /// Build never ran.
    NotBuilt,
    /// Build was aborted before reaching a verdict.
    Aborted,
}

impl BuildResult {
    /// Whether this result counts as a success for cancellation propagation.
    ///
    /// Any other result raises the owning orchestration's cancel flag when
    /// observed by the failure-propagation listener.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Fold two results into the worse of the two.
    #[must_use]
    pub fn worse_of(self, other: Self) -> Self {
        self.max(other)
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::Unstable => "unstable",
            Self::Failure => "failure",
            Self::NotBuilt => "not_built",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

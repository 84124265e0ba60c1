//! Change-detection (polling) results.
//!
//! A [`PollingResult`] is computed fresh per poll and has no persistent
//! identity. The severity ordering on [`PollChange`] is what the polling
//! aggregator uses to pick the most significant result across a downstream
//! fan-out.

use serde::{Deserialize, Serialize};

/// Severity of detected changes, least significant first.
///
/// The derived `Ord` gives `None < Incomparable < Significant`, which is the
/// ordering the aggregator compares on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollChange {
    /// No changes since the last poll.
    None,
    /// The poll could not compare against a baseline (e.g. no previous
    /// build). Outranks `None` but does not by itself warrant a build.
    Incomparable,
    /// Significant changes were detected; a build is warranted.
    Significant,
}

/// Result of one change-detection poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingResult {
    /// Detected change severity.
    pub change: PollChange,
}

impl PollingResult {
    /// A poll that found nothing new.
    pub const fn no_changes() -> Self {
        Self {
            change: PollChange::None,
        }
    }

    /// A poll that could not compare against a baseline.
    pub const fn incomparable() -> Self {
        Self {
            change: PollChange::Incomparable,
        }
    }

    /// A poll that found significant changes.
    pub const fn significant() -> Self {
        Self {
            change: PollChange::Significant,
        }
    }

    /// Whether this result warrants a build.
    pub const fn has_changes(self) -> bool {
        matches!(self.change, PollChange::Significant)
    }
}

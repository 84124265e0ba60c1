//! Multibuild Core Library
//!
//! Shared vocabulary for the multibuild orchestration engine:
//! - Build results and their severity ordering
//! - Change-detection (polling) results
//! - Per-project configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod polling;
pub mod result;
pub mod tracing_init;

pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use polling::{PollChange, PollingResult};
pub use result::BuildResult;

//! Tracing/logging setup for hosts embedding the engine.
//!
//! The host process owns the global subscriber; this helper installs it with
//! an env-filter (`RUST_LOG` overrides the supplied default) and either a
//! human-readable or a JSON output layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Install the global tracing subscriber.
///
/// * `default_filter` -- filter directives used when `RUST_LOG` is not set
///   (e.g. `"multibuild_engine=info"`).
/// * `log_json` -- when `true`, emit structured JSON log lines instead of the
///   human-readable format.
///
/// Fails when the resolved filter directives are invalid or when a global
/// subscriber has already been installed.
pub fn init_tracing(default_filter: &str, log_json: bool) -> Result<()> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_owned());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&directives)
        .map_err(|err| Error::Logging(format!("invalid log filter `{directives}`: {err}")))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|err| Error::Logging(err.to_string()))
}

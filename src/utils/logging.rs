//! # Logging
//!
//! Structured logging configuration built on `tracing-subscriber`.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! the caller's choice. These helpers set up the usual fmt subscriber with an
//! env-filter so demos, tests, and small tools don't repeat the boilerplate.

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "FIELD_SERDES_LOG";

/// Install the default fmt subscriber at `info` level (overridable via
/// `FIELD_SERDES_LOG`). Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_filter("info");
}

/// Install the fmt subscriber with an explicit fallback filter, still
/// overridable via `FIELD_SERDES_LOG`.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second subscriber in the same process is not an error here
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

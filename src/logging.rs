//! Diagnostic logging, separate from the answers and tables printed for the user.
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG`, so stdout only ever carries what a
//! command is asked to print. `aoc run` relies on this to capture a solution's answer.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`.
///
/// ```bash
/// RUST_LOG=aoc_client=debug aoc pull --day 3
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

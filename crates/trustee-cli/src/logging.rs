//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TRUSTEE_LOG=debug`.
const ENV_VAR: &str = "TRUSTEE_LOG";

/// Install the global subscriber. Defaults to warnings only, so normal
/// runs print nothing extra on the shared screen.
pub fn init() {
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

//! Process-wide `tracing` subscriber setup for the bridge tooling.
//!
//! Log lines always go to stderr: the CLI prints command results on stdout
//! and the two must not interleave.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set and valid; otherwise `default_filter` applies,
/// e.g. `"gamebridge=debug,gamebridge_core=debug"`. With `log_json` every
/// event is one JSON object per line.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let output = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry.with(output.json()).init();
    } else {
        registry.with(output).init();
    }
}

//! Logging initialisation for stagechart-cli.
//!
//! Logs go to stderr so they never mix with SVG or JSON written to stdout. The filter comes from
//! `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global tracing subscriber. Call once from `main`.
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! Structured logging via `tracing`.
//!
//! Log output goes to stderr so stdout only carries the generation summary
//! and the optional coverage table.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "info";

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Initialize the global tracing subscriber.
///
/// `level` overrides the default filter; `RUST_LOG` takes precedence over both.
/// Calling this more than once is a no-op.
pub fn init_logging(level: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match level.filter(|l| !l.is_empty()) {
            Some(level) => EnvFilter::new(level),
            None => default_env_filter(),
        }
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

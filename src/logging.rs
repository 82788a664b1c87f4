//! Logging initialization and configuration.
//!
//! Diagnostics always go to stderr; stdout may be carrying filtered output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither the config nor `RUST_LOG` names one.
pub const DEFAULT_FILTER: &str = "paintstripper=warn";

/// Build an `EnvFilter` from a level or full directive string.
///
/// A bare level such as `debug` is scoped to this crate so that
/// dependencies stay quiet.
fn build_filter(level: &str) -> EnvFilter {
    let level = level.trim();
    let directive = match level {
        "" => DEFAULT_FILTER.to_string(),
        "error" | "warn" | "info" | "debug" | "trace" | "off" => {
            format!("paintstripper={}", level)
        }
        other => other.to_string(),
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system with the given filter.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init_with_filter(level: &str) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system with the given filter.
///
/// Returns `Err` if logging has already been initialized.
pub fn try_init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}

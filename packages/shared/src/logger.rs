//! Logging setup for the Pomoroom binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose spans and events are enabled by the default filter,
/// in addition to the binary itself.
const LOGGED_CRATES: &[&str] = &["pomoroom_server", "pomoroom_shared", "tower_http"];

/// Build the default filter directive, one `target=level` pair per crate.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    LOGGED_CRATES
        .iter()
        .copied()
        .chain(std::iter::once(binary_name))
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "pomoroom-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn")
///
/// # Examples
///
/// ```no_run
/// use pomoroom_shared::logger::setup_logger;
///
/// setup_logger("pomoroom-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

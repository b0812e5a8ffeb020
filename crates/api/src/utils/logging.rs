use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,catalogsync_api=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Setting `CATALOGSYNC_LOG_FORMAT=json`
/// switches to line-delimited JSON output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("CATALOGSYNC_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        warn!("tracing subscriber already installed");
    }
}

/// Log the outcome of a route execution with structured fields.
///
/// `route` should be a stable identifier such as `"sync::categories"`.
#[inline]
pub fn log_route_execution(route: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(route, duration_ms, "route_execution_success");
    } else {
        warn!(route, duration_ms, "route_execution_failure");
    }
}

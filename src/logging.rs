// ==========================================
// Seal Inventory - logging setup
// ==========================================
// tracing + tracing-subscriber, level from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Output format switch, `json` or anything else for plain text
pub const ENV_LOG_FORMAT: &str = "SEAL_INVENTORY_LOG_FORMAT";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,actix_web=info"))
}

fn wants_json(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Initialise the global subscriber
///
/// # Environment
/// - RUST_LOG: filter, default `info`
///   e.g. RUST_LOG=debug or RUST_LOG=seal_inventory=trace
/// - SEAL_INVENTORY_LOG_FORMAT=json: one JSON object per line
///
/// # Example
/// ```no_run
/// use seal_inventory::logging;
/// logging::init();
/// ```
pub fn init() {
    let format = std::env::var(ENV_LOG_FORMAT).ok();
    if wants_json(format.as_deref()) {
        fmt()
            .json()
            .with_env_filter(default_filter())
            .with_current_span(true)
            .init();
    } else {
        fmt()
            .with_env_filter(default_filter())
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init();
    }
}

/// Subscriber for tests: debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

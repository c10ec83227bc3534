// ==========================================
// Seal Inventory - operation timing and SQL counting
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static PERF_SQL_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static SQL_COUNT: Cell<u64> = Cell::new(0);
    static SLOW_SQL_COUNT: Cell<u64> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn truncate_sql(sql: &str, max_len: usize) -> String {
    let s = sql.trim().replace('\n', " ");
    if s.chars().count() <= max_len {
        return s;
    }
    let head: String = s.chars().take(max_len).collect();
    format!("{}…", head)
}

pub const ENV_PERF_SQL: &str = "SEAL_INVENTORY_PERF_SQL";
pub const ENV_SLOW_SQL_MS: &str = "SEAL_INVENTORY_SLOW_SQL_MS";

/// Hook statement trace/profile callbacks into a connection
///
/// Counts statements run inside a [`PerfGuard`] and warns on slow ones.
/// - on by default in debug builds, off in release
/// - `SEAL_INVENTORY_PERF_SQL=1` forces it on, `=0` off
/// - `SEAL_INVENTORY_SLOW_SQL_MS=50` sets the slow threshold in ms
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = match std::env::var(ENV_PERF_SQL) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };

    PERF_SQL_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        // a reused connection may still carry old callbacks
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var(ENV_SLOW_SQL_MS)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
    SLOW_SQL_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(sql_trace_callback));
    conn.profile(Some(sql_profile_callback));
}

fn sql_trace_callback(_sql: &str) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if !active {
        return;
    }
    SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        let sql_short = truncate_sql(sql, 420);
        tracing::warn!(
            target: "slow_sql",
            duration_ms = ms,
            sql = %sql_short,
            "slow sql"
        );
        let active = PERF_DEPTH.with(|d| d.get() > 0);
        if active {
            SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
        }
    }
}

/// Logs elapsed_ms, sql_count and slow_sql_count for one tenant operation on drop
///
/// ```ignore
/// let _perf = seal_inventory::perf::PerfGuard::new("record_production_run", &ctx.company_id);
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    company_id: String,
    start: Instant,
    sql_start: u64,
    slow_sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str, company_id: &str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            company_id: company_id.to_string(),
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            slow_sql_start: SLOW_SQL_COUNT.with(|c| c.get()),
        }
    }

    /// Statements traced on this thread since the guard was created
    pub fn sql_count(&self) -> u64 {
        SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start)
    }

    fn slow_sql_count(&self) -> u64 {
        SLOW_SQL_COUNT.with(|c| c.get()).saturating_sub(self.slow_sql_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        tracing::info!(
            target: "perf",
            op = self.op,
            company_id = %self.company_id,
            elapsed_ms,
            sql_count = self.sql_count(),
            slow_sql_count = self.slow_sql_count(),
            "done"
        );

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

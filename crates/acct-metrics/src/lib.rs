//! Metrics collection and Prometheus exporter for acctstore.
//!
//! Request counts, latencies and failures of the account gateway. Recording
//! functions are no-ops until a recorder is installed.

use std::net::SocketAddr;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize Prometheus metrics exporter.
///
/// Starts an HTTP server on the given address to expose metrics.
/// Returns an error message if binding fails.
pub fn init_prometheus(listen: &str) -> Result<(), String> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| format!("invalid metrics listen address: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("failed to install prometheus exporter: {}", e))?;

    Ok(())
}

// ============================================================================
// Metric Names
// ============================================================================

/// Total number of handled requests by operation and status code.
pub const REQUESTS_TOTAL: &str = "acct_requests_total";
/// Request duration histogram (seconds) by operation.
pub const REQUEST_DURATION_SECONDS: &str = "acct_request_duration_seconds";
/// Total number of failed requests by operation and error type.
pub const ERRORS_TOTAL: &str = "acct_errors_total";
/// Total number of accounts moved to a new login.
pub const RENAMES_TOTAL: &str = "acct_renames_total";

// ============================================================================
// Operation Labels
// ============================================================================

pub const OP_CREATE: &str = "create";
pub const OP_READ: &str = "read";
pub const OP_UPDATE: &str = "update";
pub const OP_DELETE: &str = "delete";

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record a finished request.
#[inline]
pub fn record_request(op: &'static str, status: u16, duration_secs: f64) {
    counter!(REQUESTS_TOTAL, "op" => op, "status" => status.to_string()).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "op" => op).record(duration_secs);
}

/// Record a failed request by error type.
#[inline]
pub fn record_error(op: &'static str, error_type: &'static str) {
    counter!(ERRORS_TOTAL, "op" => op, "type" => error_type).increment(1);
}

/// Record an account rename.
#[inline]
pub fn record_rename() {
    counter!(RENAMES_TOTAL).increment(1);
}

//! Analytics/audit sink port.
//!
//! Successful sync operations emit one record each. The sink is
//! fire-and-forget: it never blocks and never fails the job.

use serde_json::Value;
use tracing::debug;

pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: &str, fields: Value);
}

/// Sink that drops every record. Default when no analytics pipeline is
/// wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnalytics;

impl AnalyticsSink for NullAnalytics {
    fn record(&self, event: &str, _fields: Value) {
        debug!(event, "analytics record dropped (null sink)");
    }
}

/// Sink that forwards records to the tracing pipeline as structured
/// events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn record(&self, event: &str, fields: Value) {
        tracing::info!(target: "tracksync::analytics", event, %fields, "analytics");
    }
}

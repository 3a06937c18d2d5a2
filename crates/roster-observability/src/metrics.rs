//! Event counters for notable roster operations.
//!
//! Counters go through the `metrics` facade. [`init_metrics`] installs an
//! in-process Prometheus recorder (no network listener); the CLI renders it
//! on request. Without a recorder the counters are no-ops.

use ::metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

/// Handle onto the installed recorder.
#[derive(Clone)]
pub struct MetricsHandle(PrometheusHandle);

impl MetricsHandle {
    /// Current counter values in Prometheus text format.
    pub fn render(&self) -> String {
        self.0.render()
    }
}

/// Installs the process-wide recorder.
///
/// Returns `None` when a recorder is already installed.
pub fn init_metrics() -> Option<MetricsHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(MetricsHandle(handle)),
        Err(e) => {
            warn!(error = %e, "Metrics recorder not installed");
            None
        }
    }
}

pub fn track_record_added() {
    counter!("roster_records_added_total").increment(1);
}

pub fn track_record_updated() {
    counter!("roster_records_updated_total").increment(1);
}

pub fn track_record_deleted() {
    counter!("roster_records_deleted_total").increment(1);
}

pub fn track_import_completed(accepted: usize, rejected: usize) {
    counter!("roster_import_rows_total", "outcome" => "accepted").increment(accepted as u64);
    counter!("roster_import_rows_total", "outcome" => "rejected").increment(rejected as u64);
}

//! Prometheus metrics for crm-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, register_int_counter, CounterVec, IntCounter, TextEncoder};
use std::sync::OnceLock;

/// Recorder behind the `metrics` facade used by the HTTP middleware.
static HTTP_METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Invoice totals computed (totals endpoint and draft preparation).
pub static INVOICE_TOTALS_COMPUTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "crm_invoice_totals_computed_total",
        "Total number of invoice totals computed"
    )
    .expect("Failed to register invoice_totals_computed_total")
});

/// Pipeline moves by entity kind and outcome.
pub static PIPELINE_MOVES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "crm_pipeline_moves_total",
        "Total number of pipeline moves by entity and outcome",
        &["entity", "outcome"] // outcome: updated, noop
    )
    .expect("Failed to register pipeline_moves_total")
});

/// Leads/deals left off the board because their stage or status is unknown.
pub static PIPELINE_UNPLACED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "crm_pipeline_unplaced_entities_total",
        "Total number of entities excluded from every pipeline column",
        &["entity"]
    )
    .expect("Failed to register pipeline_unplaced_entities_total")
});

/// Initialize all metrics and install the HTTP metrics recorder.
///
/// Only the first call installs the recorder; later calls are no-ops.
pub fn init_metrics() {
    Lazy::force(&INVOICE_TOTALS_COMPUTED);
    Lazy::force(&PIPELINE_MOVES_TOTAL);
    Lazy::force(&PIPELINE_UNPLACED_TOTAL);

    if HTTP_METRICS_HANDLE.get().is_some() {
        return;
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = HTTP_METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "HTTP metrics recorder not installed"),
    }
}

pub fn record_totals_computed() {
    INVOICE_TOTALS_COMPUTED.inc();
}

pub fn record_move(entity: &str, updated: bool) {
    let outcome = if updated { "updated" } else { "noop" };
    PIPELINE_MOVES_TOTAL
        .with_label_values(&[entity, outcome])
        .inc();
}

pub fn record_unplaced(entity: &str) {
    PIPELINE_UNPLACED_TOTAL.with_label_values(&[entity]).inc();
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = HTTP_METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    output.push_str(&encoder.encode_to_string(&metric_families).unwrap_or_default());
    output
}

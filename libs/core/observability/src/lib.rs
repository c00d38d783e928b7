//! Observability utilities for the cloud assistant bot.
//!
//! This crate provides:
//! - Prometheus metrics recording and export
//! - Metric helpers for message dispatch and the pricing engine
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, metrics_handler, DispatchMetrics};
//!
//! init_metrics()?;
//!
//! DispatchMetrics::record_command("calculate_vm");
//!
//! let app = Router::new()
//!     .route("/metrics", get(metrics_handler));
//! ```

pub mod dispatch;
pub mod pricing;

pub use dispatch::{CollaboratorTimer, DispatchMetrics};
pub use metrics_exporter_prometheus::BuildError;
pub use pricing::PricingMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::info;

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Installs the global recorder on the first call; later calls return the
/// same handle.
pub fn init_metrics() -> Result<&'static PrometheusHandle, BuildError> {
    METRICS_HANDLE.get_or_try_init(|| {
        let handle = PrometheusBuilder::new().install_recorder()?;

        info!("Prometheus metrics recorder initialized");
        register_metric_descriptions();

        Ok(handle)
    })
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Axum handler for /metrics endpoint
pub async fn metrics_handler() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_histogram;

    // Dispatch
    describe_counter!(
        "assistant_commands_total",
        "Slash commands handled, by command"
    );
    describe_counter!(
        "assistant_intents_total",
        "Free-text messages handled, by classified intent"
    );
    describe_counter!(
        "assistant_collaborator_calls_total",
        "Language model and inventory calls by collaborator and outcome"
    );
    describe_histogram!(
        "assistant_collaborator_duration_seconds",
        "Collaborator call duration in seconds"
    );

    // Pricing
    describe_counter!(
        "pricing_vm_calculations_total",
        "VM cost estimates computed"
    );
    describe_counter!(
        "pricing_info_lookups_total",
        "Pricing information lookups by service"
    );
}

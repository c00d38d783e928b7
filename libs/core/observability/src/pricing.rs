//! Pricing engine metrics.

use metrics::counter;

/// Pricing metrics recorder
pub struct PricingMetrics;

impl PricingMetrics {
    /// Record a VM cost estimate
    pub fn record_vm_calculation() {
        counter!("pricing_vm_calculations_total").increment(1);
    }

    /// Record a pricing information lookup under a fixed topic label
    pub fn record_info_lookup(topic: &'static str) {
        counter!("pricing_info_lookups_total", "service" => topic).increment(1);

        tracing::debug!(topic, "Pricing info lookup");
    }
}

use std::sync::Arc;

use crate::calculator::compute_vm_cost;
use crate::messages;
use crate::models::{ServiceRecommendation, ServiceRequirements, VmCostRequest, VmCostResult};
use crate::rates::RateTable;
use crate::recommender::recommend_services;

/// Pricing engine facade over a shared, read-only rate table
#[derive(Debug, Clone, Default)]
pub struct PricingService {
    rates: Arc<RateTable>,
}

impl PricingService {
    /// Create a new pricing service
    pub fn new(rates: RateTable) -> Self {
        Self {
            rates: Arc::new(rates),
        }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Estimate the cost of a VM configuration
    pub fn calculate_vm_cost(&self, request: &VmCostRequest) -> VmCostResult {
        let result = compute_vm_cost(&self.rates, request);
        tracing::debug!(
            cpu = request.cpu_cores,
            ram = request.ram_gb,
            disk = request.disk_gb,
            hours = request.hours,
            total = result.total.amount,
            "Calculated VM cost"
        );
        result
    }

    /// Recommend services for the given requirements
    pub fn recommend_services(&self, requirements: &ServiceRequirements) -> ServiceRecommendation {
        recommend_services(requirements)
    }

    pub fn format_price_message(&self, result: &VmCostResult) -> String {
        messages::format_price_message(result)
    }

    pub fn format_recommendation(&self, recommendation: &ServiceRecommendation) -> String {
        messages::format_recommendation(recommendation)
    }

    /// Published pricing for `compute` or `storage`
    pub fn pricing_info(&self, service: &str) -> String {
        messages::pricing_info(&self.rates, service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_uses_configured_rates() {
        let mut rates = RateTable::default();
        rates.compute.cpu_hour = 1.0;
        rates.compute.ram_gb_hour = 0.0;
        rates.compute.disk_gb_month = 0.0;

        let service = PricingService::new(rates);
        let result = service.calculate_vm_cost(&VmCostRequest::new(2, 8, 100).with_hours(10));

        assert_eq!(result.total.amount, 2_000);
        assert!(service.pricing_info("compute").contains("1 ₽/hour per core"));
    }

    #[test]
    fn test_clones_share_rates() {
        let service = PricingService::default();
        let clone = service.clone();
        assert!(std::ptr::eq(service.rates(), clone.rates()));
    }
}

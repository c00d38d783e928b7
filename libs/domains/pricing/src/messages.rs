//! Plain-text rendering of pricing data for chat replies

use std::str::FromStr;
use strum::{Display, EnumString, IntoStaticStr};

use crate::models::{ServiceRecommendation, VmCostResult};
use crate::rates::RateTable;

/// Reply for services without published pricing
pub const PRICING_UNAVAILABLE: &str = "Pricing information for this service is unavailable";

/// Services with published pricing information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PricingTopic {
    Compute,
    Storage,
}

impl PricingTopic {
    /// Label for a lookup key: the topic name, or `other` for anything unknown.
    /// Keeps the label set closed whatever users type.
    pub fn label(service: &str) -> &'static str {
        PricingTopic::from_str(service)
            .map(<&'static str>::from)
            .unwrap_or("other")
    }
}

/// Render a VM cost estimate
pub fn format_price_message(result: &VmCostResult) -> String {
    let mut message = String::from("💰 Cost estimate:\n\n");
    message.push_str(&format!("Total: {}/month\n\n", result.total));
    message.push_str("📊 Breakdown:\n");
    message.push_str(&format!("• CPU: {}\n", result.cpu_cost));
    message.push_str(&format!("• RAM: {}\n", result.ram_cost));
    message.push_str(&format!("• Disk: {}\n", result.disk_cost));
    message
}

/// Render the published rates for a service key.
///
/// Only exact keys are recognized; anything else gets [`PRICING_UNAVAILABLE`].
pub fn pricing_info(rates: &RateTable, service: &str) -> String {
    match PricingTopic::from_str(service) {
        Ok(PricingTopic::Compute) => compute_pricing(rates),
        Ok(PricingTopic::Storage) => storage_pricing(rates),
        Err(_) => PRICING_UNAVAILABLE.to_string(),
    }
}

fn compute_pricing(rates: &RateTable) -> String {
    let symbol = rates.currency.symbol();
    let compute = &rates.compute;
    format!(
        "💻 Compute Cloud pricing:\n\n\
         • CPU: {cpu} {symbol}/hour per core\n\
         • RAM: {ram} {symbol}/hour per GB\n\
         • Disk: {disk} {symbol}/month per GB\n\n\
         To estimate a VM, use:\n\
         /calculate_vm [cpu] [ram] [disk]\n\
         Example: /calculate_vm 2 4 100",
        cpu = compute.cpu_hour,
        ram = compute.ram_gb_hour,
        disk = compute.disk_gb_month,
    )
}

fn storage_pricing(rates: &RateTable) -> String {
    let symbol = rates.currency.symbol();
    let storage = &rates.storage;
    format!(
        "💾 Object Storage pricing:\n\n\
         • Storage: {gb} {symbol}/month per GB\n\
         • Read operations: {read} {symbol} per 1000 operations\n\
         • Write operations: {write} {symbol} per 1000 operations",
        gb = storage.gb_month,
        read = storage.operations.read,
        write = storage.operations.write,
    )
}

/// Render a service recommendation as a bullet list
pub fn format_recommendation(recommendation: &ServiceRecommendation) -> String {
    if recommendation.is_empty() {
        return "No recommendation is available for this project type.".to_string();
    }

    let mut message = String::from("🎯 Recommended services:\n\n");
    for service in &recommendation.services {
        message.push_str(&format!("• {}: {}\n", service.service_name, service.reason));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute_vm_cost;
    use crate::models::VmCostRequest;
    use crate::recommender::recommend_services;
    use crate::ServiceRequirements;

    #[test]
    fn test_format_price_message() {
        let rates = RateTable::default();
        let result = compute_vm_cost(&rates, &VmCostRequest::new(2, 4, 100));
        let message = format_price_message(&result);

        assert!(message.contains("Total: 11641.60 ₽/month"));
        assert!(message.contains("• CPU: 6935.00 ₽"));
        assert!(message.contains("• RAM: 4613.60 ₽"));
        assert!(message.contains("• Disk: 93.00 ₽"));
    }

    #[test]
    fn test_pricing_info_compute() {
        let info = pricing_info(&RateTable::default(), "compute");
        assert!(info.contains("4.75 ₽/hour per core"));
        assert!(info.contains("1.58 ₽/hour per GB"));
        assert!(info.contains("0.93 ₽/month per GB"));
    }

    #[test]
    fn test_pricing_info_storage() {
        let info = pricing_info(&RateTable::default(), "storage");
        assert!(info.contains("0.15 ₽/month per GB"));
        assert!(info.contains("0.0000876"));
        assert!(info.contains("0.0008766"));
    }

    #[test]
    fn test_pricing_info_unknown() {
        let rates = RateTable::default();
        assert_eq!(pricing_info(&rates, "database"), PRICING_UNAVAILABLE);
        assert_eq!(pricing_info(&rates, "Compute"), PRICING_UNAVAILABLE);
        assert_eq!(pricing_info(&rates, ""), PRICING_UNAVAILABLE);
    }

    #[test]
    fn test_topic_label_is_closed() {
        assert_eq!(PricingTopic::label("compute"), "compute");
        assert_eq!(PricingTopic::label("storage"), "storage");
        assert_eq!(PricingTopic::label("database"), "other");
        assert_eq!(PricingTopic::label("junk42"), "other");
    }

    #[test]
    fn test_format_recommendation() {
        let recommendation =
            recommend_services(&ServiceRequirements::new("web_app").with_traffic(10));
        let message = format_recommendation(&recommendation);
        assert!(message.contains("• Cloud Functions:"));

        let empty = format_recommendation(&ServiceRecommendation::default());
        assert!(empty.contains("No recommendation"));
    }
}

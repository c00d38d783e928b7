//! Virtual machine cost calculator
//!
//! CPU and RAM are billed per hour of uptime, disk is a flat monthly rate
//! and is not scaled by `hours`.

use crate::models::{Money, VmCostRequest, VmCostResult};
use crate::rates::RateTable;

/// Compute the cost of a VM configuration over `request.hours`.
///
/// Each sub-cost and the total are rounded independently; the total is
/// rounded from the unrounded sum.
pub fn compute_vm_cost(rates: &RateTable, request: &VmCostRequest) -> VmCostResult {
    let compute = &rates.compute;
    let hours = request.hours as f64;

    let cpu_cost = compute.cpu_hour * request.cpu_cores as f64 * hours;
    let ram_cost = compute.ram_gb_hour * request.ram_gb as f64 * hours;
    let disk_cost = compute.disk_gb_month * request.disk_gb as f64;

    let total = Money::from_decimal(cpu_cost + ram_cost + disk_cost, rates.currency);

    VmCostResult {
        cpu_cost: Money::from_decimal(cpu_cost, rates.currency),
        ram_cost: Money::from_decimal(ram_cost, rates.currency),
        disk_cost: Money::from_decimal(disk_cost, rates.currency),
        total,
        monthly_estimate: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(cpu: i64, ram: i64, disk: i64, hours: i64) -> VmCostResult {
        compute_vm_cost(
            &RateTable::default(),
            &VmCostRequest::new(cpu, ram, disk).with_hours(hours),
        )
    }

    #[test]
    fn test_reference_configuration() {
        let result = cost(2, 4, 100, 730);

        assert_eq!(result.cpu_cost.amount, 693_500);
        assert_eq!(result.ram_cost.amount, 461_360);
        assert_eq!(result.disk_cost.amount, 9_300);
        assert_eq!(result.total.amount, 1_164_160);
        assert_eq!(result.total.to_decimal(), 11641.6);
        assert_eq!(result.monthly_estimate, result.total);
    }

    #[test]
    fn test_disk_cost_ignores_hours() {
        let month = cost(1, 1, 250, 730);
        let day = cost(1, 1, 250, 24);

        assert_eq!(month.disk_cost, day.disk_cost);
        assert_ne!(month.cpu_cost, day.cpu_cost);
    }

    #[test]
    fn test_cpu_and_ram_scale_with_hours() {
        let short = cost(2, 2, 0, 100);
        let long = cost(2, 2, 0, 200);

        assert_eq!(long.cpu_cost.amount, short.cpu_cost.amount * 2);
        assert_eq!(long.ram_cost.amount, short.ram_cost.amount * 2);
    }

    #[test]
    fn test_zero_and_negative_inputs_are_not_rejected() {
        let zero = cost(0, 0, 0, 730);
        assert_eq!(zero.total.amount, 0);

        let negative = cost(-1, 0, 0, 730);
        assert_eq!(negative.cpu_cost.amount, -346_750);
        assert_eq!(negative.total, negative.cpu_cost);
    }

    #[test]
    fn test_total_rounds_unrounded_sum() {
        // 0.93 * 1 = 0.93, 1.58 * 1 * 1 = 1.58, 4.75 * 1 * 1 = 4.75
        let result = cost(1, 1, 1, 1);
        assert_eq!(result.total.amount, 726);
        assert_eq!(
            result.total.amount,
            result.cpu_cost.amount + result.ram_cost.amount + result.disk_cost.amount
        );
    }

    #[test]
    fn test_same_input_same_output() {
        assert_eq!(cost(3, 7, 42, 512), cost(3, 7, 42, 512));
    }
}

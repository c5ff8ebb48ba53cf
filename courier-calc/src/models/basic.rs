//! Capacity-only model used by salaried couriers.

use courier_core::{CalcRejection, CostModel, GeoEdge, RouteCost, VehicleType, route_timing};

/// Applies the vehicle limits and prices every feasible route at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCostModel;

impl CostModel for BasicCostModel {
    fn method(&self) -> &str {
        "basic"
    }

    fn calculate(
        &self,
        vehicle: &VehicleType,
        edges: &[GeoEdge],
        total_weight_kg: f64,
        is_loop: bool,
    ) -> Result<RouteCost, CalcRejection> {
        let timing = route_timing(vehicle, edges, total_weight_kg, is_loop)?;
        Ok(RouteCost {
            node_delivery_time: timing.node_delivery_time,
            total_delivery_time: timing.total_delivery_time,
            total_execution_time: timing.total_execution_time,
            total_cost: 0.0,
        })
    }
}

//! Time-based tariff for couriers paid by the hour.

use courier_core::{
    CalcRejection, CostModel, GeoEdge, ParameterError, RouteCost, VehicleParameters, VehicleType,
    route_timing,
};

/// Prices a route at `hourly_rate` per hour of execution time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyCostModel {
    /// Price of one hour, return leg included.
    pub hourly_rate: f64,
}

impl HourlyCostModel {
    /// Read `hourly_rate` from the vehicle parameters.
    ///
    /// # Errors
    /// Returns a [`ParameterError`] when the rate is missing or not a number.
    pub fn from_parameters(parameters: &VehicleParameters) -> Result<Self, ParameterError> {
        Ok(Self {
            hourly_rate: parameters.number("hourly_rate")?,
        })
    }
}

impl CostModel for HourlyCostModel {
    fn method(&self) -> &str {
        "hourly"
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "hourly prices scale fractional minutes"
    )]
    fn calculate(
        &self,
        vehicle: &VehicleType,
        edges: &[GeoEdge],
        total_weight_kg: f64,
        is_loop: bool,
    ) -> Result<RouteCost, CalcRejection> {
        let timing = route_timing(vehicle, edges, total_weight_kg, is_loop)?;
        let total_cost = self.hourly_rate * timing.total_execution_time / 60.0;
        Ok(RouteCost {
            node_delivery_time: timing.node_delivery_time,
            total_delivery_time: timing.total_delivery_time,
            total_execution_time: timing.total_execution_time,
            total_cost,
        })
    }
}

//! Cost-model boundary between the route engine and tariff implementations.

use thiserror::Error;

use crate::{GeoEdge, VehicleType};

/// Reasons a cost model refuses a route.
///
/// These are expected outcomes of the search, not faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcRejection {
    /// The edge sequence does not visit any order.
    #[error("route visits no orders")]
    EmptyRoute,
    /// Total weight is above the vehicle limit.
    #[error("total weight {weight_kg} kg exceeds vehicle limit {max_kg} kg")]
    Overweight {
        /// Route payload.
        weight_kg: f64,
        /// Vehicle payload limit.
        max_kg: f64,
    },
    /// More orders than the vehicle may carry.
    #[error("{count} orders exceed vehicle limit of {max}")]
    TooManyOrders {
        /// Orders in the route.
        count: usize,
        /// Vehicle order limit.
        max: usize,
    },
    /// Accumulated distance is above the vehicle limit.
    #[error("route distance {distance_km} km exceeds vehicle limit {max_km} km")]
    TooFar {
        /// Accumulated distance when the limit was crossed.
        distance_km: f64,
        /// Vehicle distance limit.
        max_km: f64,
    },
}

/// Timing and cost of one route as computed by a [`CostModel`].
///
/// All times are minutes measured from the moment the run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCost {
    /// Cumulative node times: the shop departure after pickup, then the
    /// hand-over of each order in visiting order.
    pub node_delivery_time: Vec<f64>,
    /// Hand-over time at the last delivery node.
    pub total_delivery_time: f64,
    /// Delivery time plus the return leg for looped routes.
    pub total_execution_time: f64,
    /// Route price in the tariff's currency.
    pub total_cost: f64,
}

/// Turn a route's edges into timings and a price for one vehicle type.
///
/// `edges[0]` is the shop→first order edge and `edges[i]` links order `i - 1`
/// to order `i`. When `is_loop` is set a final edge back to the shop is
/// appended, so a looped route over `k` orders carries `k + 1` edges.
///
/// [`RouteCost::node_delivery_time`] carries `k + 1` entries. Models built on
/// [`route_timing`](crate::route_timing) get that layout for free.
///
/// Implementations are pure and must be `Send + Sync`; a single instance is
/// shared by every courier of a vehicle type across worker threads.
pub trait CostModel: Send + Sync {
    /// Registry name of the model.
    fn method(&self) -> &str;

    /// Compute timings and cost, or reject the route for capacity reasons.
    ///
    /// # Errors
    /// Returns a [`CalcRejection`] when weight, order count or distance exceed
    /// the vehicle limits.
    fn calculate(
        &self,
        vehicle: &VehicleType,
        edges: &[GeoEdge],
        total_weight_kg: f64,
        is_loop: bool,
    ) -> Result<RouteCost, CalcRejection>;
}

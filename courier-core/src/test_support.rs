//! Test-only fixtures: a straight-line geo provider, a minute-priced cost
//! model and builders for common domain values.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use geo::Coord;

use crate::{
    BoundCourier, CalcRejection, CostModel, Courier, GeoDataError, GeoDataProvider, GeoEdge,
    GeoMatrix, Order, RouteCost, Shop, ShopBinding, TimeWindow, VehicleParameters, VehicleType,
    haversine_distance_m, minutes_delta, route_timing,
};

/// Deterministic `GeoDataProvider` using great-circle distances at a fixed
/// speed.
#[derive(Debug, Copy, Clone)]
pub struct StraightLineProvider {
    /// Travel speed in kilometres per hour.
    pub speed_kmh: f64,
}

impl Default for StraightLineProvider {
    fn default() -> Self {
        Self { speed_kmh: 30.0 }
    }
}

impl GeoDataProvider for StraightLineProvider {
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "test distances are small and rounded to whole metres and seconds"
    )]
    fn get_distance_matrix(&self, points: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError> {
        if points.is_empty() {
            return Err(GeoDataError::EmptyInput);
        }
        let metres_per_second = self.speed_kmh / 3.6;
        GeoMatrix::from_fn(points.len(), |from, to| {
            match (points.get(from), points.get(to)) {
                (Some(a), Some(b)) => {
                    let metres = haversine_distance_m(*a, *b).round();
                    let seconds = (metres / metres_per_second).round();
                    GeoEdge::new(metres as i32, seconds as i32)
                }
                _ => GeoEdge::default(),
            }
        })
    }
}

/// Cost model charging one unit per minute of execution time.
///
/// Timing and capacity checks come from [`route_timing`], the routine every
/// production model uses.
#[derive(Debug, Copy, Clone, Default)]
pub struct MinuteCostModel;

impl CostModel for MinuteCostModel {
    fn method(&self) -> &str {
        "minute"
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
            total_cost: timing.total_execution_time,
            node_delivery_time: timing.node_delivery_time,
            total_delivery_time: timing.total_delivery_time,
            total_execution_time: timing.total_execution_time,
        })
    }
}

/// Fixed reference instant used across tests: 2024-05-01 12:00 UTC.
#[must_use]
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// `noon()` shifted by `minutes`.
#[must_use]
pub fn noon_plus(minutes: f64) -> DateTime<Utc> {
    let base = noon();
    minutes_delta(minutes)
        .and_then(|delta| base.checked_add_signed(delta))
        .unwrap_or(base)
}

/// Window from `noon() + from_min` to `noon() + to_min`.
#[must_use]
pub fn window(from_min: f64, to_min: f64) -> TimeWindow {
    TimeWindow {
        from: noon_plus(from_min),
        to: noon_plus(to_min),
    }
}

/// Vehicle type with generous limits and small fixed time costs.
#[must_use]
pub fn vehicle(is_taxi: bool) -> VehicleType {
    VehicleType {
        vehicle_id: if is_taxi { 2 } else { 1 },
        is_taxi,
        max_order_weight_kg: 10.0,
        max_weight_kg: 10.0,
        max_orders: 8,
        max_distance_km: 100.0,
        start_delay_min: 0.0,
        get_order_time_min: 5.0,
        hand_in_time_min: 3.0,
        calc_method: "minute".into(),
        parameters: VehicleParameters::new(),
    }
}

/// Shop at `location` that never closes.
#[must_use]
pub fn shop_at(id: u64, location: Coord<f64>) -> Shop {
    Shop::new(id, location)
}

/// Order for shop 1 with a two-hour window starting at noon.
#[must_use]
pub fn order(id: u64, weight_kg: f64, location: Coord<f64>) -> Order {
    Order::new(id, 1, weight_kg, location, window(0.0, 120.0))
}

/// Courier bound to shop 1 using [`MinuteCostModel`].
#[must_use]
pub fn bound_courier(vehicle: VehicleType) -> BoundCourier {
    let binding = if vehicle.is_taxi {
        ShopBinding::TaxiPool
    } else {
        ShopBinding::Shop(1)
    };
    let courier = Courier::new(1, Arc::new(vehicle), binding, Coord { x: 0.0, y: 0.0 });
    BoundCourier::new(courier, Arc::new(MinuteCostModel))
}

/// Matrix where every hop between distinct points costs `metres` and
/// `seconds`.
#[must_use]
#[expect(clippy::expect_used, reason = "size is clamped to at least one point")]
pub fn uniform_matrix(size: usize, metres: i32, seconds: i32) -> GeoMatrix {
    GeoMatrix::from_fn(size.max(1), |from, to| {
        if from == to {
            GeoEdge::default()
        } else {
            GeoEdge::new(metres, seconds)
        }
    })
    .expect("non-empty matrix")
}

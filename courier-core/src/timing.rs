//! Capacity checks and node timing shared by every reference cost model.

use crate::{CalcRejection, GeoEdge, VehicleType};

/// Timing of one route before any tariff is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTiming {
    /// Cumulative node times in minutes from the run start.
    ///
    /// Entry 0 is the shop, left once the pickup delay and order acceptance
    /// are over; entry `i` is the hand-over of the `i`-th delivered order.
    pub node_delivery_time: Vec<f64>,
    /// Arrival time at the last delivery node.
    pub total_delivery_time: f64,
    /// Delivery time plus the return leg for looped routes.
    pub total_execution_time: f64,
    /// Length of every walked edge, including the return edge, in km.
    pub distance_km: f64,
    /// Travel time of the shop to first order edge, in minutes.
    pub first_leg_minutes: f64,
    /// Number of delivered orders.
    pub order_count: usize,
}

/// Check the vehicle limits and derive node timings for `edges`.
///
/// `edges` follows the [`CostModel`](crate::CostModel) layout: the
/// delivery edges, then the return edge when `is_loop` is set. Node 0 sits
/// at `start_delay + get_order_time`; every delivered order adds its inbound
/// edge and the hand-in time.
///
/// # Errors
/// Returns [`CalcRejection::EmptyRoute`] when no order is visited, and the
/// capacity variants when the weight, order count or accumulated distance
/// exceed the vehicle limits.
///
/// # Examples
/// ```
/// use courier_core::{GeoEdge, VehicleParameters, VehicleType, route_timing};
///
/// let vehicle = VehicleType {
///     vehicle_id: 1,
///     is_taxi: false,
///     max_order_weight_kg: 5.0,
///     max_weight_kg: 10.0,
///     max_orders: 3,
///     max_distance_km: 20.0,
///     start_delay_min: 2.0,
///     get_order_time_min: 3.0,
///     hand_in_time_min: 4.0,
///     calc_method: "basic".into(),
///     parameters: VehicleParameters::new(),
/// };
/// let edges = [GeoEdge::new(1000, 600), GeoEdge::new(1000, 300), GeoEdge::new(2000, 120)];
/// let timing = route_timing(&vehicle, &edges, 4.0, true)?;
/// assert_eq!(timing.node_delivery_time, vec![5.0, 19.0, 28.0]);
/// assert_eq!(timing.total_delivery_time, 28.0);
/// assert_eq!(timing.total_execution_time, 30.0);
/// assert_eq!(timing.distance_km, 4.0);
/// # Ok::<(), courier_core::CalcRejection>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "route timings and distances are fractional minutes and kilometres"
)]
pub fn route_timing(
    vehicle: &VehicleType,
    edges: &[GeoEdge],
    total_weight_kg: f64,
    is_loop: bool,
) -> Result<RouteTiming, CalcRejection> {
    let (delivery_edges, return_edge) = split_return_edge(edges, is_loop)?;
    let Some(first_leg) = delivery_edges.first() else {
        return Err(CalcRejection::EmptyRoute);
    };
    if total_weight_kg > vehicle.max_weight_kg {
        return Err(CalcRejection::Overweight {
            weight_kg: total_weight_kg,
            max_kg: vehicle.max_weight_kg,
        });
    }
    if delivery_edges.len() > vehicle.max_orders {
        return Err(CalcRejection::TooManyOrders {
            count: delivery_edges.len(),
            max: vehicle.max_orders,
        });
    }

    let mut distance_km = 0.0;
    for edge in edges {
        distance_km += edge.distance_km();
        if distance_km > vehicle.max_distance_km {
            return Err(CalcRejection::TooFar {
                distance_km,
                max_km: vehicle.max_distance_km,
            });
        }
    }

    let mut node_delivery_time = Vec::with_capacity(delivery_edges.len() + 1);
    let mut clock = vehicle.pickup_minutes();
    node_delivery_time.push(clock);
    for edge in delivery_edges {
        clock += edge.duration_minutes() + vehicle.hand_in_time_min;
        node_delivery_time.push(clock);
    }
    let total_execution_time = clock + return_edge.map_or(0.0, GeoEdge::duration_minutes);

    Ok(RouteTiming {
        node_delivery_time,
        total_delivery_time: clock,
        total_execution_time,
        distance_km,
        first_leg_minutes: first_leg.duration_minutes(),
        order_count: delivery_edges.len(),
    })
}

fn split_return_edge(
    edges: &[GeoEdge],
    is_loop: bool,
) -> Result<(&[GeoEdge], Option<GeoEdge>), CalcRejection> {
    if !is_loop {
        return Ok((edges, None));
    }
    let (last, rest) = edges.split_last().ok_or(CalcRejection::EmptyRoute)?;
    Ok((rest, Some(*last)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::vehicle;
    use rstest::rstest;

    fn legs(count: usize) -> Vec<GeoEdge> {
        vec![GeoEdge::new(1_000, 300); count]
    }

    #[rstest]
    fn taxi_route_has_no_return_leg() {
        let timing = route_timing(&vehicle(true), &legs(2), 1.0, false).expect("feasible");
        assert_eq!(timing.node_delivery_time, vec![5.0, 13.0, 21.0]);
        assert!((timing.total_delivery_time - 21.0).abs() < 1e-9);
        assert!((timing.total_execution_time - timing.total_delivery_time).abs() < 1e-9);
        assert_eq!(timing.order_count, 2);
    }

    #[rstest]
    fn first_node_is_the_pickup_and_every_order_pays_hand_in() {
        let mut slow = vehicle(true);
        slow.start_delay_min = 2.0;
        slow.get_order_time_min = 3.0;
        slow.hand_in_time_min = 4.0;
        let edges = [GeoEdge::new(1_000, 600), GeoEdge::new(1_000, 300)];
        let timing = route_timing(&slow, &edges, 1.0, false).expect("feasible");
        assert_eq!(timing.node_delivery_time.first(), Some(&5.0));
        assert_eq!(timing.node_delivery_time, vec![5.0, 19.0, 28.0]);
        assert!((timing.first_leg_minutes - 10.0).abs() < 1e-9);
    }

    #[rstest]
    fn looped_route_adds_return_leg() {
        let timing = route_timing(&vehicle(false), &legs(3), 1.0, true).expect("feasible");
        assert_eq!(timing.order_count, 2);
        assert_eq!(timing.node_delivery_time, vec![5.0, 13.0, 21.0]);
        assert!((timing.total_execution_time - 26.0).abs() < 1e-9);
        assert!((timing.distance_km - 3.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(legs(0), false)]
    #[case(legs(1), true)]
    fn routes_without_orders_are_rejected(#[case] edges: Vec<GeoEdge>, #[case] is_loop: bool) {
        assert_eq!(
            route_timing(&vehicle(false), &edges, 1.0, is_loop),
            Err(CalcRejection::EmptyRoute)
        );
    }

    #[rstest]
    fn overweight_route_is_rejected() {
        let result = route_timing(&vehicle(false), &legs(2), 10.5, true);
        assert!(matches!(result, Err(CalcRejection::Overweight { .. })));
    }

    #[rstest]
    fn too_many_orders_are_rejected() {
        let mut small = vehicle(true);
        small.max_orders = 2;
        let result = route_timing(&small, &legs(3), 1.0, false);
        assert_eq!(
            result,
            Err(CalcRejection::TooManyOrders { count: 3, max: 2 })
        );
    }

    #[rstest]
    fn return_leg_counts_towards_distance_limit() {
        let mut short = vehicle(false);
        short.max_distance_km = 2.5;
        let result = route_timing(&short, &legs(3), 1.0, true);
        assert!(matches!(
            result,
            Err(CalcRejection::TooFar { distance_km, .. }) if (distance_km - 3.0).abs() < 1e-9
        ));
    }
}

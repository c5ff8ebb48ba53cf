//! Feasible delivery runs produced by the route engine.
//!
//! A [`RouteDescriptor`] borrows the shop, courier and orders it describes and
//! owns only the values computed for the run.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::{BoundCourier, GeoEdge, Order, Shop};

/// Interval in which a route may start and still meet every time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryInterval {
    /// Earliest admissible start.
    pub earliest: DateTime<Utc>,
    /// Latest admissible start.
    pub latest: DateTime<Utc>,
}

impl DeliveryInterval {
    /// Report whether the route may start at `instant`.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.earliest <= instant && instant <= self.latest
    }
}

/// Values assembled by the feasibility checker for a new descriptor.
#[derive(Debug, Clone)]
pub struct RouteParts<'a> {
    /// Courier running the route.
    pub courier: &'a BoundCourier,
    /// Shop the route starts from.
    pub shop: &'a Shop,
    /// Orders in visiting order.
    pub orders: Vec<&'a Order>,
    /// Clock time the route was evaluated at.
    pub calc_time: DateTime<Utc>,
    /// Whether the route returns to the shop.
    pub is_loop: bool,
    /// Edges walked, including the return edge for looped routes.
    pub edges: Vec<GeoEdge>,
    /// Cumulative node times in minutes: the shop, then each order.
    pub node_delivery_time: Vec<f64>,
    /// Arrival time at the last order, in minutes.
    pub total_delivery_time: f64,
    /// Delivery time plus the return leg, in minutes.
    pub total_execution_time: f64,
    /// Route price.
    pub cost: f64,
    /// Total payload in kilograms.
    pub weight_kg: f64,
    /// Admissible start interval.
    pub interval: DeliveryInterval,
}

/// A feasible route: one courier delivering an ordered bundle of orders.
///
/// Descriptors are only assembled once every check has passed, so cost,
/// weight and timing always agree with the stored edges.
///
/// Serialises orders, courier and shop by identifier.
#[derive(Debug, Clone, Serialize)]
pub struct RouteDescriptor<'a> {
    #[serde(rename = "courier_id", serialize_with = "courier_id")]
    courier: &'a BoundCourier,
    #[serde(rename = "shop_id", serialize_with = "shop_id")]
    shop: &'a Shop,
    #[serde(rename = "order_ids", serialize_with = "order_ids")]
    orders: Vec<&'a Order>,
    calc_time: DateTime<Utc>,
    is_loop: bool,
    edges: Vec<GeoEdge>,
    node_delivery_time: Vec<f64>,
    total_delivery_time: f64,
    total_execution_time: f64,
    cost: f64,
    weight_kg: f64,
    interval: DeliveryInterval,
}

impl<'a> RouteDescriptor<'a> {
    /// Assemble a descriptor from checked parts.
    #[must_use]
    pub fn new(parts: RouteParts<'a>) -> Self {
        debug_assert_eq!(
            parts.edges.len(),
            parts.orders.len() + usize::from(parts.is_loop),
            "edge count must match order count plus optional return edge"
        );
        debug_assert_eq!(
            parts.node_delivery_time.len(),
            parts.orders.len() + 1,
            "one node time for the shop and one per order"
        );
        Self {
            courier: parts.courier,
            shop: parts.shop,
            orders: parts.orders,
            calc_time: parts.calc_time,
            is_loop: parts.is_loop,
            edges: parts.edges,
            node_delivery_time: parts.node_delivery_time,
            total_delivery_time: parts.total_delivery_time,
            total_execution_time: parts.total_execution_time,
            cost: parts.cost,
            weight_kg: parts.weight_kg,
            interval: parts.interval,
        }
    }

    /// Courier running the route.
    #[must_use]
    pub const fn courier(&self) -> &'a BoundCourier {
        self.courier
    }

    /// Shop the route starts from.
    #[must_use]
    pub const fn shop(&self) -> &'a Shop {
        self.shop
    }

    /// Orders in visiting order.
    #[must_use]
    pub fn orders(&self) -> &[&'a Order] {
        &self.orders
    }

    /// Number of orders delivered.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Identifiers of the delivered orders in visiting order.
    #[must_use]
    pub fn order_ids(&self) -> Vec<u64> {
        self.orders.iter().map(|order| order.id).collect()
    }

    /// Clock time the route was evaluated at.
    #[must_use]
    pub const fn calc_time(&self) -> DateTime<Utc> {
        self.calc_time
    }

    /// Whether the route returns to the shop.
    #[must_use]
    pub const fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Edges walked, including the return edge for looped routes.
    #[must_use]
    pub fn edges(&self) -> &[GeoEdge] {
        &self.edges
    }

    /// Sum of edge distances in metres.
    #[must_use]
    pub fn total_distance_m(&self) -> i64 {
        self.edges.iter().map(|edge| i64::from(edge.distance_m)).sum()
    }

    /// Cumulative node times in minutes. Entry 0 is the shop departure.
    #[must_use]
    pub fn node_delivery_time(&self) -> &[f64] {
        &self.node_delivery_time
    }

    /// Hand-over time of each order in visiting order, in minutes.
    #[must_use]
    pub fn order_delivery_time(&self) -> &[f64] {
        self.node_delivery_time.get(1..).unwrap_or_default()
    }

    /// Arrival time at the last order, in minutes.
    #[must_use]
    pub const fn total_delivery_time(&self) -> f64 {
        self.total_delivery_time
    }

    /// Delivery time plus the return leg, in minutes.
    #[must_use]
    pub const fn total_execution_time(&self) -> f64 {
        self.total_execution_time
    }

    /// Route price.
    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Total payload in kilograms.
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Admissible start interval.
    #[must_use]
    pub const fn interval(&self) -> DeliveryInterval {
        self.interval
    }
}

fn courier_id<S: Serializer>(courier: &&BoundCourier, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(courier.courier().id)
}

fn shop_id<S: Serializer>(shop: &&Shop, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(shop.id)
}

fn order_ids<S: Serializer>(orders: &[&Order], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(orders.iter().map(|order| order.id))
}

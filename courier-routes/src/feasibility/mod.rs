//! Feasibility checking for one ordered delivery sequence.
//!
//! A check walks the geo indices to collect edges, enforces the weight limits,
//! asks the courier's cost model for timings and cost, and finally intersects
//! the delivery windows into an admissible start interval. Only a route that
//! survives every step becomes a [`RouteDescriptor`].

mod error;
mod window;

use chrono::{DateTime, Utc};
use courier_core::{
    BoundCourier, GeoEdge, GeoMatrix, MAX_ROUTE_LEN, Order, RouteDescriptor, RouteParts, Shop,
};

pub use error::{CapacityViolation, Rejection, ValidationError, WindowConflict};
pub use window::UNBOUNDED_START_SPAN;

use window::start_interval;

/// Checks candidate routes for one courier leaving one shop.
///
/// Geo indices address rows of the matrix: one per order in visiting order,
/// followed by the shop's index.
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityChecker<'a> {
    courier: &'a BoundCourier,
    shop: &'a Shop,
    matrix: &'a GeoMatrix,
    calc_time: DateTime<Utc>,
    is_loop: bool,
}

impl<'a> FeasibilityChecker<'a> {
    /// Checker for `courier` leaving `shop` at `calc_time`.
    ///
    /// Routes loop back to the shop unless the courier is a taxi.
    #[must_use]
    pub fn new(
        courier: &'a BoundCourier,
        shop: &'a Shop,
        matrix: &'a GeoMatrix,
        calc_time: DateTime<Utc>,
    ) -> Self {
        Self {
            courier,
            shop,
            matrix,
            calc_time,
            is_loop: courier.is_loop(),
        }
    }

    /// Override whether routes return to the shop.
    #[must_use]
    pub const fn with_loop(mut self, is_loop: bool) -> Self {
        self.is_loop = is_loop;
        self
    }

    /// Whether checked routes return to the shop.
    #[must_use]
    pub const fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Check `orders`, visited in the given sequence.
    ///
    /// `geo_indices` holds one matrix index per order followed by the shop
    /// index.
    ///
    /// # Errors
    /// Returns a [`Rejection`] describing the first failed check.
    pub fn check(
        &self,
        orders: &[&'a Order],
        geo_indices: &[usize],
    ) -> Result<RouteDescriptor<'a>, Rejection> {
        let shop_geo = self.validate(orders, geo_indices)?;
        let mut edges = Vec::with_capacity(orders.len() + usize::from(self.is_loop));
        let mut from = shop_geo;
        for to in geo_indices.iter().take(orders.len()) {
            edges.push(self.edge(from, *to)?);
            from = *to;
        }
        if self.is_loop {
            edges.push(self.edge(from, shop_geo)?);
        }

        let mut weight_kg = 0.0;
        for order in orders {
            weight_kg = self.add_weight(weight_kg, order)?;
        }
        self.finish(orders.to_vec(), edges, weight_kg)
    }

    /// Extend a checked route by one order.
    ///
    /// Reuses the delivery edges of `prefix`, appends the edge into `order`
    /// and, for looped routes, a fresh return edge. The result equals
    /// [`FeasibilityChecker::check`] on the extended sequence.
    ///
    /// # Errors
    /// Returns a [`Rejection`] describing the first failed check.
    pub fn extend(
        &self,
        prefix: &RouteDescriptor<'a>,
        prefix_geo: &[usize],
        order: &'a Order,
        order_geo: usize,
    ) -> Result<RouteDescriptor<'a>, Rejection> {
        let count = prefix.order_count() + 1;
        if count > MAX_ROUTE_LEN {
            return Err(ValidationError::TooLong {
                count,
                max: MAX_ROUTE_LEN,
            }
            .into());
        }
        let shop_geo = self.validate(prefix.orders(), prefix_geo)?;
        if order_geo >= self.matrix.size() {
            return Err(ValidationError::GeoIndexOutOfRange {
                index: order_geo,
                size: self.matrix.size(),
            }
            .into());
        }
        let last_geo = prefix_geo
            .get(prefix.order_count().saturating_sub(1))
            .copied()
            .unwrap_or(shop_geo);

        let mut edges = Vec::with_capacity(count + usize::from(self.is_loop));
        edges.extend(prefix.edges().iter().take(prefix.order_count()));
        edges.push(self.edge(last_geo, order_geo)?);
        if self.is_loop {
            edges.push(self.edge(order_geo, shop_geo)?);
        }

        let weight_kg = self.add_weight(prefix.weight_kg(), order)?;
        let mut orders = Vec::with_capacity(count);
        orders.extend_from_slice(prefix.orders());
        orders.push(order);
        self.finish(orders, edges, weight_kg)
    }

    /// Validate lengths and indices, returning the shop's geo index.
    fn validate(
        &self,
        orders: &[&Order],
        geo_indices: &[usize],
    ) -> Result<usize, ValidationError> {
        let count = orders.len();
        if count == 0 {
            return Err(ValidationError::Empty);
        }
        if count > MAX_ROUTE_LEN {
            return Err(ValidationError::TooLong {
                count,
                max: MAX_ROUTE_LEN,
            });
        }
        if geo_indices.len() != count + 1 {
            return Err(ValidationError::GeoIndexCount {
                expected: count + 1,
                found: geo_indices.len(),
            });
        }
        let size = self.matrix.size();
        if size < count + 1 {
            return Err(ValidationError::MatrixTooSmall {
                size,
                required: count + 1,
            });
        }
        if let Some(index) = geo_indices.iter().copied().find(|index| *index >= size) {
            return Err(ValidationError::GeoIndexOutOfRange { index, size });
        }
        geo_indices.last().copied().ok_or(ValidationError::Empty)
    }

    fn edge(&self, from: usize, to: usize) -> Result<GeoEdge, ValidationError> {
        self.matrix
            .get(from, to)
            .ok_or_else(|| ValidationError::GeoIndexOutOfRange {
                index: from.max(to),
                size: self.matrix.size(),
            })
    }

    #[expect(clippy::float_arithmetic, reason = "payloads are fractional kilograms")]
    fn add_weight(&self, running_kg: f64, order: &Order) -> Result<f64, CapacityViolation> {
        let vehicle = self.courier.vehicle();
        if order.weight_kg > vehicle.max_order_weight_kg {
            return Err(CapacityViolation::OrderTooHeavy {
                order_id: order.id,
                weight_kg: order.weight_kg,
                max_kg: vehicle.max_order_weight_kg,
            });
        }
        let weight_kg = running_kg + order.weight_kg;
        if weight_kg > vehicle.max_weight_kg {
            return Err(CapacityViolation::Overweight {
                order_id: order.id,
                weight_kg,
                max_kg: vehicle.max_weight_kg,
            });
        }
        Ok(weight_kg)
    }

    fn finish(
        &self,
        orders: Vec<&'a Order>,
        edges: Vec<GeoEdge>,
        weight_kg: f64,
    ) -> Result<RouteDescriptor<'a>, Rejection> {
        let cost = self.courier.calculator().calculate(
            self.courier.vehicle(),
            &edges,
            weight_kg,
            self.is_loop,
        )?;
        let per_order = match cost.node_delivery_time.split_first() {
            Some((_, rest)) if rest.len() == orders.len() => rest,
            _ => {
                return Err(ValidationError::NodeTimeCount {
                    expected: orders.len() + 1,
                    found: cost.node_delivery_time.len(),
                }
                .into());
            }
        };
        let interval = start_interval(self.calc_time, &orders, per_order)?;
        Ok(RouteDescriptor::new(RouteParts {
            courier: self.courier,
            shop: self.shop,
            orders,
            calc_time: self.calc_time,
            is_loop: self.is_loop,
            edges,
            node_delivery_time: cost.node_delivery_time,
            total_delivery_time: cost.total_delivery_time,
            total_execution_time: cost.total_execution_time,
            cost: cost.total_cost,
            weight_kg,
            interval,
        }))
    }
}

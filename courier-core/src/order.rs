//! Pending customer orders.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::TimeWindow;

/// Lifecycle state reported by the order feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for a courier.
    #[default]
    Pending,
    /// Handed to a courier but not yet delivered.
    Assigned,
    /// Delivered to the customer.
    Delivered,
    /// Cancelled by the shop or customer.
    Cancelled,
}

/// An order waiting to be delivered from a shop.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use courier_core::{Order, TimeWindow};
///
/// let from = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
/// let to = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let order = Order::new(7, 1, 2.5, Coord { x: 0.01, y: 0.0 }, TimeWindow::new(from, to)?);
/// assert!(order.time_check_enabled());
/// # Ok::<(), courier_core::TimeWindowError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    pub id: u64,
    /// Identifier of the shop the order ships from.
    pub shop_id: u64,
    /// Parcel weight in kilograms.
    pub weight_kg: f64,
    /// Delivery position.
    pub location: Coord<f64>,
    /// Window in which the customer accepts the delivery.
    pub window: TimeWindow,
    /// Skip the time-window check for this order.
    #[serde(default)]
    pub skip_time_check: bool,
    /// Dispatch priority; higher values are more urgent.
    #[serde(default)]
    pub priority: i32,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Construct a pending order with default priority and time checking on.
    #[must_use]
    pub const fn new(
        id: u64,
        shop_id: u64,
        weight_kg: f64,
        location: Coord<f64>,
        window: TimeWindow,
    ) -> Self {
        Self {
            id,
            shop_id,
            weight_kg,
            location,
            window,
            skip_time_check: false,
            priority: 0,
            status: OrderStatus::Pending,
        }
    }

    /// Disable the time-window check, returning `self` for chaining.
    #[must_use]
    pub const fn without_time_check(mut self) -> Self {
        self.skip_time_check = true;
        self
    }

    /// Report whether the delivery window constrains routes containing this
    /// order.
    #[must_use]
    pub const fn time_check_enabled(&self) -> bool {
        !self.skip_time_check
    }

    /// Report whether the order may still be bundled into a route.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, OrderStatus::Pending)
    }
}

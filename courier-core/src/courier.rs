//! Couriers and taxis available for dispatch.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{CostModel, TimeWindow, VehicleType};

/// Live status reported by the courier feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    /// Waiting at the shop for a run.
    #[default]
    Ready,
    /// Out delivering orders.
    DeliversOrder,
    /// On a lunch break.
    LunchTime,
    /// Shift is over.
    WorkEnded,
    /// Relocating to another point.
    MoveToPoint,
}

/// Where a courier takes work from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopBinding {
    /// Bound to one shop.
    Shop(u64),
    /// Shared taxi pool serving every shop.
    TaxiPool,
}

/// Running totals maintained by the courier feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierTotals {
    /// Orders delivered so far.
    pub order_count: u32,
    /// Accumulated delivery time in minutes.
    pub delivery_time_min: f64,
    /// Accumulated cost.
    pub cost: f64,
    /// `cost / order_count`, or zero before the first delivery.
    pub average_order_cost: f64,
}

impl CourierTotals {
    /// Add a finished run to the totals.
    #[expect(
        clippy::float_arithmetic,
        reason = "totals accumulate fractional minutes and prices"
    )]
    pub fn record(&mut self, orders: u32, delivery_time_min: f64, cost: f64) {
        self.order_count = self.order_count.saturating_add(orders);
        self.delivery_time_min += delivery_time_min;
        self.cost += cost;
        self.average_order_cost = if self.order_count == 0 {
            0.0
        } else {
            self.cost / f64::from(self.order_count)
        };
    }
}

/// A vehicle-type instance with live state.
///
/// The enumeration engine only ever reads couriers; updates arrive between
/// passes through the methods below.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    /// Unique identifier.
    pub id: u64,
    /// Shared vehicle parameters.
    pub vehicle: Arc<VehicleType>,
    /// Current status.
    pub status: CourierStatus,
    /// Shift window, if the courier works shifts.
    pub work_window: Option<TimeWindow>,
    /// Lunch break window, if scheduled.
    pub lunch_window: Option<TimeWindow>,
    /// Last reported position.
    pub location: Coord<f64>,
    /// Running totals.
    pub totals: CourierTotals,
    /// Shop binding.
    pub binding: ShopBinding,
}

impl Courier {
    /// Construct a ready courier with empty totals.
    #[must_use]
    pub fn new(
        id: u64,
        vehicle: Arc<VehicleType>,
        binding: ShopBinding,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id,
            vehicle,
            status: CourierStatus::Ready,
            work_window: None,
            lunch_window: None,
            location,
            totals: CourierTotals::default(),
            binding,
        }
    }

    /// Report whether the courier is a taxi.
    #[must_use]
    pub fn is_taxi(&self) -> bool {
        self.vehicle.is_taxi
    }

    /// Report whether the courier may take orders from `shop_id`.
    #[must_use]
    pub const fn serves_shop(&self, shop_id: u64) -> bool {
        match self.binding {
            ShopBinding::Shop(id) => id == shop_id,
            ShopBinding::TaxiPool => true,
        }
    }

    /// Report whether the courier can start a run at `instant`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use chrono::{TimeZone, Utc};
    /// use geo::Coord;
    /// use courier_core::{Courier, CourierStatus, ShopBinding, VehicleParameters, VehicleType};
    ///
    /// let vehicle = Arc::new(VehicleType {
    ///     vehicle_id: 1,
    ///     is_taxi: false,
    ///     max_order_weight_kg: 10.0,
    ///     max_weight_kg: 20.0,
    ///     max_orders: 4,
    ///     max_distance_km: 30.0,
    ///     start_delay_min: 0.0,
    ///     get_order_time_min: 5.0,
    ///     hand_in_time_min: 3.0,
    ///     calc_method: "basic".into(),
    ///     parameters: VehicleParameters::new(),
    /// });
    /// let mut courier = Courier::new(1, vehicle, ShopBinding::Shop(1), Coord { x: 0.0, y: 0.0 });
    /// let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    /// assert!(courier.is_available_at(now));
    /// courier.status = CourierStatus::LunchTime;
    /// assert!(!courier.is_available_at(now));
    /// ```
    #[must_use]
    pub fn is_available_at(&self, instant: DateTime<Utc>) -> bool {
        if self.status != CourierStatus::Ready {
            return false;
        }
        if self.work_window.is_some_and(|w| !w.contains(instant)) {
            return false;
        }
        !self.lunch_window.is_some_and(|w| w.contains(instant))
    }

    /// Fold a finished run into the courier's running totals.
    pub fn record_delivery(&mut self, orders: u32, delivery_time_min: f64, cost: f64) {
        self.totals.record(orders, delivery_time_min, cost);
    }
}

/// A courier paired with its resolved cost model.
///
/// The calculator registry produces these after validating the vehicle's
/// configuration, so the engine never meets an unresolved calc method.
#[derive(Clone)]
pub struct BoundCourier {
    courier: Courier,
    calculator: Arc<dyn CostModel>,
}

impl BoundCourier {
    /// Pair a courier with an already validated cost model.
    #[must_use]
    pub fn new(courier: Courier, calculator: Arc<dyn CostModel>) -> Self {
        Self {
            courier,
            calculator,
        }
    }

    /// The underlying courier.
    #[must_use]
    pub const fn courier(&self) -> &Courier {
        &self.courier
    }

    /// The courier's vehicle type.
    #[must_use]
    pub fn vehicle(&self) -> &VehicleType {
        &self.courier.vehicle
    }

    /// The bound cost model.
    #[must_use]
    pub fn calculator(&self) -> &dyn CostModel {
        self.calculator.as_ref()
    }

    /// Routes return to the shop unless the courier is a taxi.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        !self.courier.is_taxi()
    }
}

impl fmt::Debug for BoundCourier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCourier")
            .field("courier", &self.courier)
            .field("calculator", &self.calculator.method())
            .finish()
    }
}

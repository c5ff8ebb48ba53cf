//! Facade crate for the courier dispatch engine.
//!
//! This crate re-exports the core domain types and exposes the cost-model
//! registry and the route enumerator behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    BoundCourier, CalcRejection, CostModel, Courier, CourierStatus, DeliveryInterval,
    GeoDataError, GeoDataProvider, GeoEdge, GeoMatrix, MAX_ROUTE_LEN, Order, RouteCost,
    RouteDescriptor, Shop, ShopBinding, TimeWindow, VehicleParameters, VehicleType,
};

#[cfg(feature = "calc")]
pub use courier_calc::{CalculatorConfigError, CalculatorRegistry, CourierPool};

#[cfg(feature = "routes")]
pub use courier_routes::{
    EnumerationConfig, EnumerationError, FeasibilityChecker, RouteEnumerator, RouteSet,
    enumerate_routes,
};

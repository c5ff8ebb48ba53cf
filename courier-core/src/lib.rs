//! Core domain types for the courier dispatch engine.
//!
//! The crate holds everything the route engine reads but never owns: shops,
//! orders, vehicle types, couriers, the geo edge model and the cost-model
//! boundary. Constructors that can fail return `Result` so malformed input is
//! surfaced before an enumeration pass starts.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod courier;
pub mod geo;
pub mod order;
pub mod route;
pub mod shop;
pub mod time;
pub mod timing;
pub mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{CalcRejection, CostModel, RouteCost};
pub use courier::{BoundCourier, Courier, CourierStatus, CourierTotals, ShopBinding};
pub use geo::{
    CachingGeoProvider, GeoDataError, GeoDataProvider, GeoEdge, GeoMatrix, haversine_distance_m,
};
pub use order::{Order, OrderStatus};
pub use route::{DeliveryInterval, RouteDescriptor, RouteParts};
pub use shop::{Shop, WorkingHours};
pub use time::{TimeWindow, TimeWindowError, minutes_delta};
pub use timing::{RouteTiming, route_timing};
pub use vehicle::{ParameterError, ParameterValue, VehicleParameters, VehicleType};

/// Hard ceiling on the number of orders a single delivery run may bundle.
pub const MAX_ROUTE_LEN: usize = 8;

//! Route feasibility and exhaustive bundle enumeration.
//!
//! [`FeasibilityChecker`] decides whether one ordered delivery sequence is
//! admissible for a courier and, if so, builds its
//! [`RouteDescriptor`](courier_core::RouteDescriptor). [`RouteEnumerator`]
//! walks every sequence up to a length bound and keeps the cheapest
//! permutation of each distinct order bundle, keyed by [`CanonicalKey`].
//! Independent shops fan out across the rayon pool through
//! [`RouteEnumerator::enumerate_shops`].

#![forbid(unsafe_code)]

mod capacity;
mod enumerate;
mod feasibility;
mod key;

pub use capacity::{MAX_PRESIZE, estimated_capacity};
pub use enumerate::{
    EnumerationConfig, EnumerationDiagnostics, EnumerationError, MAX_ORDERS, RouteEnumerator,
    RouteSet, ShopRoutes, ShopTask, enumerate_routes,
};
pub use feasibility::{
    CapacityViolation, FeasibilityChecker, Rejection, UNBOUNDED_START_SPAN, ValidationError,
    WindowConflict,
};
pub use key::{CanonicalKey, KeyPacking, PackedKeyHasher, PackedKeyState};

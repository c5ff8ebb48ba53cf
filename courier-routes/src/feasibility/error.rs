//! Reasons a candidate route is not feasible.

use chrono::{DateTime, Utc};
use courier_core::CalcRejection;
use thiserror::Error;

/// Malformed route requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The route visits no orders.
    #[error("route visits no orders")]
    Empty,
    /// The route bundles more orders than a run may carry.
    #[error("route bundles {count} orders, the ceiling is {max}")]
    TooLong {
        /// Orders in the request.
        count: usize,
        /// Hard ceiling.
        max: usize,
    },
    /// The geo index list is not one entry longer than the order list.
    #[error("expected {expected} geo indices, found {found}")]
    GeoIndexCount {
        /// Orders plus the shop.
        expected: usize,
        /// Indices supplied.
        found: usize,
    },
    /// The matrix covers fewer points than the route visits.
    #[error("matrix covers {size} points, route needs {required}")]
    MatrixTooSmall {
        /// Matrix dimension.
        size: usize,
        /// Orders plus the shop.
        required: usize,
    },
    /// A geo index points outside the matrix.
    #[error("geo index {index} is outside a matrix of {size} points")]
    GeoIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Matrix dimension.
        size: usize,
    },
    /// The cost model returned a node time list of the wrong length.
    #[error("cost model returned {found} node times, expected {expected}")]
    NodeTimeCount {
        /// The shop plus one entry per order.
        expected: usize,
        /// Entries returned.
        found: usize,
    },
}

/// Weight limits checked before the cost model runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapacityViolation {
    /// One order is heavier than the vehicle accepts.
    #[error("order {order_id} weighs {weight_kg} kg, per-order limit is {max_kg} kg")]
    OrderTooHeavy {
        /// Offending order.
        order_id: u64,
        /// Its weight.
        weight_kg: f64,
        /// Vehicle per-order limit.
        max_kg: f64,
    },
    /// The running payload passed the vehicle limit.
    #[error("payload reaches {weight_kg} kg at order {order_id}, limit is {max_kg} kg")]
    Overweight {
        /// Order at which the limit was crossed.
        order_id: u64,
        /// Running payload.
        weight_kg: f64,
        /// Vehicle payload limit.
        max_kg: f64,
    },
}

/// Delivery windows that cannot all be met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowConflict {
    /// The feasible start interval became empty at this order.
    #[error("delivery window of order {order_id} leaves no common start time")]
    Disjoint {
        /// Order whose window emptied the interval.
        order_id: u64,
    },
    /// Every admissible start lies before the calculation time.
    #[error("latest admissible start {latest} is before the calculation time")]
    Expired {
        /// End of the start interval.
        latest: DateTime<Utc>,
    },
    /// Shifting the window by the node time left the timestamp range.
    #[error("delivery window of order {order_id} cannot be shifted by its arrival time")]
    OutOfRange {
        /// Offending order.
        order_id: u64,
    },
}

/// Why the feasibility checker refused a route.
///
/// Every variant is an expected search outcome; none indicates a fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// The request itself was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A weight limit was exceeded before costing.
    #[error(transparent)]
    Capacity(#[from] CapacityViolation),
    /// The cost model refused the route.
    #[error(transparent)]
    Calculator(#[from] CalcRejection),
    /// The delivery windows cannot all be met.
    #[error(transparent)]
    TimeWindow(#[from] WindowConflict),
}

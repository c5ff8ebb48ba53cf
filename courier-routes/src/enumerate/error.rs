//! Errors raised before an enumeration pass starts.

use thiserror::Error;

/// Invalid enumeration requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// The route length bound is zero or above the hard ceiling.
    #[error("maximum route length {max_len} is outside 1..={ceiling}")]
    InvalidMaxLen {
        /// Requested bound.
        max_len: usize,
        /// Hard ceiling on orders per run.
        ceiling: usize,
    },
    /// More orders than a canonical key can index.
    #[error("{count} orders exceed the supported {max}")]
    TooManyOrders {
        /// Orders supplied.
        count: usize,
        /// Largest supported order count.
        max: usize,
    },
    /// The geo matrix does not cover every order plus the shop.
    #[error("matrix covers {size} points, {required} are required")]
    MatrixTooSmall {
        /// Matrix dimension.
        size: usize,
        /// Orders plus the shop.
        required: usize,
    },
}

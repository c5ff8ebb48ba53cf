use thiserror::Error;

/// Errors from [`crate::geo::GeoDataProvider::get_distance_matrix`] and
/// [`crate::geo::GeoMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoDataError {
    /// No points were provided.
    ///
    /// A matrix needs at least the shop position. Callers should pre-filter
    /// input to avoid this condition.
    #[error("at least one geo-point is required")]
    EmptyInput,
    /// A row does not have as many entries as the matrix has rows.
    ///
    /// Partial data from the routing provider is a hard precondition failure.
    #[error("matrix row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Number of entries found in the row.
        found: usize,
    },
    /// The provider returned a matrix for a different number of points.
    #[error("matrix covers {found} points, expected {expected}")]
    SizeMismatch {
        /// Number of points requested.
        expected: usize,
        /// Size of the matrix returned.
        found: usize,
    },
}

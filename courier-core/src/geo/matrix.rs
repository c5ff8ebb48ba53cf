//! Immutable square matrix of [`GeoEdge`] values.

use serde::{Deserialize, Serialize};

use super::{GeoDataError, GeoEdge};

/// Fully populated `n×n` matrix of directed edges.
///
/// `get(i, j)` is the edge from point `i` to point `j`. By convention the
/// order positions come first and the shop position is the last point.
///
/// # Examples
/// ```
/// use courier_core::{GeoEdge, GeoMatrix};
///
/// let matrix = GeoMatrix::from_rows(vec![
///     vec![GeoEdge::default(), GeoEdge::new(100, 60)],
///     vec![GeoEdge::new(120, 70), GeoEdge::default()],
/// ])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.get(1, 0), Some(GeoEdge::new(120, 70)));
/// assert_eq!(matrix.get(2, 0), None);
/// # Ok::<(), courier_core::GeoDataError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<GeoEdge>>", into = "Vec<Vec<GeoEdge>>")]
pub struct GeoMatrix {
    size: usize,
    edges: Vec<GeoEdge>,
}

impl GeoMatrix {
    /// Build a matrix from row vectors, rejecting ragged or empty input.
    ///
    /// # Errors
    /// Returns [`GeoDataError::EmptyInput`] for an empty row list and
    /// [`GeoDataError::RaggedRow`] when any row length differs from the row
    /// count.
    pub fn from_rows(rows: Vec<Vec<GeoEdge>>) -> Result<Self, GeoDataError> {
        let size = rows.len();
        if size == 0 {
            return Err(GeoDataError::EmptyInput);
        }
        let mut edges = Vec::with_capacity(size.saturating_mul(size));
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != size {
                return Err(GeoDataError::RaggedRow {
                    row,
                    expected: size,
                    found: entries.len(),
                });
            }
            edges.extend(entries);
        }
        Ok(Self { size, edges })
    }

    /// Build a matrix by evaluating `edge(from, to)` for every ordered pair.
    ///
    /// # Errors
    /// Returns [`GeoDataError::EmptyInput`] when `size` is zero.
    pub fn from_fn<F>(size: usize, mut edge: F) -> Result<Self, GeoDataError>
    where
        F: FnMut(usize, usize) -> GeoEdge,
    {
        if size == 0 {
            return Err(GeoDataError::EmptyInput);
        }
        let edges = (0..size)
            .flat_map(|from| (0..size).map(move |to| (from, to)))
            .map(|(from, to)| edge(from, to))
            .collect();
        Ok(Self { size, edges })
    }

    /// Number of points covered by the matrix.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Report whether the matrix covers at least `points` points.
    #[must_use]
    pub const fn covers(&self, points: usize) -> bool {
        self.size >= points
    }

    /// Edge from point `from` to point `to`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<GeoEdge> {
        if from >= self.size || to >= self.size {
            return None;
        }
        from.checked_mul(self.size)
            .and_then(|offset| offset.checked_add(to))
            .and_then(|idx| self.edges.get(idx))
            .copied()
    }

    /// Iterate over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[GeoEdge]> {
        self.edges.chunks(self.size)
    }
}

impl TryFrom<Vec<Vec<GeoEdge>>> for GeoMatrix {
    type Error = GeoDataError;

    fn try_from(rows: Vec<Vec<GeoEdge>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<GeoMatrix> for Vec<Vec<GeoEdge>> {
    fn from(matrix: GeoMatrix) -> Self {
        matrix.rows().map(<[GeoEdge]>::to_vec).collect()
    }
}

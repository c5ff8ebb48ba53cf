//! Geo-data provider trait for distance/duration matrices.

use geo::Coord;

use super::{GeoDataError, GeoMatrix};

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Fetch pairwise distances and durations for a set of geo-points.
///
/// Implementers must return a square `n×n` matrix where `n == points.len()`.
/// Callers pass the order positions first and the shop position last, so the
/// shop sits at index `points.len() - 1`.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use courier_core::{GeoDataError, GeoDataProvider, GeoEdge, GeoMatrix};
///
/// struct UnitProvider;
///
/// impl GeoDataProvider for UnitProvider {
///     fn get_distance_matrix(&self, points: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError> {
///         GeoMatrix::from_fn(points.len(), |from, to| {
///             if from == to { GeoEdge::default() } else { GeoEdge::new(1_000, 60) }
///         })
///     }
/// }
///
/// let matrix = UnitProvider.get_distance_matrix(&[Coord { x: 0.0, y: 0.0 }])?;
/// assert_eq!(matrix.size(), 1);
/// # Ok::<(), GeoDataError>(())
/// ```
pub trait GeoDataProvider {
    /// Return the edge matrix for `points`.
    ///
    /// Implementations must return `Err(GeoDataError::EmptyInput)` when
    /// `points` is empty.
    fn get_distance_matrix(&self, points: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError>;
}

/// Great-circle distance in metres between two WGS84 coordinates.
///
/// Coordinates use `x = longitude` and `y = latitude`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine formula operates on floating-point angles"
)]
pub fn haversine_distance_m(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let dlat = (to.y - from.y).to_radians();
    let dlon = (to.x - from.x).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::StraightLineProvider;

    #[rstest]
    fn haversine_is_zero_for_identical_points() {
        let point = Coord { x: 13.4, y: 52.5 };
        assert!(haversine_distance_m(point, point).abs() < 1e-9);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_distance_m(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((d - 111_195.0).abs() < 100.0, "unexpected distance {d}");
    }

    #[rstest]
    fn returns_square_matrix() {
        let provider = StraightLineProvider::default();
        let points = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }];
        let matrix = provider
            .get_distance_matrix(&points)
            .expect("expected square matrix from StraightLineProvider");
        assert_eq!(matrix.size(), points.len());
        assert_eq!(matrix.get(0, 0).map(|e| e.distance_m), Some(0));
        assert!(matrix.get(0, 1).is_some_and(|e| e.distance_m > 0));
    }

    #[rstest]
    fn errors_on_empty_input() {
        let provider = StraightLineProvider::default();
        let err = provider
            .get_distance_matrix(&[])
            .expect_err("expected EmptyInput for empty slice");
        assert_eq!(err, GeoDataError::EmptyInput);
    }
}

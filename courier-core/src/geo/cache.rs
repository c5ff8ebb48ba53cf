//! Memoising wrapper around a [`GeoDataProvider`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use geo::Coord;

use super::{GeoDataError, GeoDataProvider, GeoMatrix};

type PointKey = Vec<(u64, u64)>;

/// Caches matrices returned by an inner provider, keyed by the exact point
/// list.
///
/// The cache and its counters belong to the wrapper instance; nothing is
/// shared process-wide. Build one per dispatch pass and drop it afterwards.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use courier_core::{CachingGeoProvider, GeoDataError, GeoDataProvider, GeoEdge, GeoMatrix};
///
/// struct Flat;
/// impl GeoDataProvider for Flat {
///     fn get_distance_matrix(&self, points: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError> {
///         GeoMatrix::from_fn(points.len(), |_, _| GeoEdge::new(10, 1))
///     }
/// }
///
/// let cached = CachingGeoProvider::new(Flat);
/// let points = [Coord { x: 1.0, y: 2.0 }];
/// cached.get_distance_matrix(&points)?;
/// cached.get_distance_matrix(&points)?;
/// assert_eq!((cached.hits(), cached.misses()), (1, 1));
/// # Ok::<(), GeoDataError>(())
/// ```
#[derive(Debug)]
pub struct CachingGeoProvider<P> {
    inner: P,
    entries: Mutex<HashMap<PointKey, GeoMatrix>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P> CachingGeoProvider<P>
where
    P: GeoDataProvider,
{
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of lookups forwarded to the inner provider.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Drop every cached matrix.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        log::debug!("dropping {} cached distance matrices", entries.len());
        entries.clear();
    }

    /// Consume the wrapper and return the inner provider.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

fn point_key(points: &[Coord<f64>]) -> PointKey {
    points.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect()
}

impl<P> GeoDataProvider for CachingGeoProvider<P>
where
    P: GeoDataProvider,
{
    fn get_distance_matrix(&self, points: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError> {
        if points.is_empty() {
            return Err(GeoDataError::EmptyInput);
        }
        let key = point_key(points);
        if let Some(found) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(found.clone());
        }

        let misses = self.misses.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!(
            "distance matrix cache miss for {} points ({misses} misses so far)",
            points.len()
        );
        let matrix = self.inner.get_distance_matrix(points)?;
        let (expected, found) = (points.len(), matrix.size());
        if found != expected {
            log::warn!(
                "provider returned a {found}x{found} matrix for {expected} points; not caching it"
            );
            return Err(GeoDataError::SizeMismatch { expected, found });
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, matrix.clone());
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::GeoEdge;
    use crate::test_support::StraightLineProvider;

    #[rstest]
    fn distinct_point_lists_are_cached_separately() {
        let cached = CachingGeoProvider::new(StraightLineProvider::default());
        let a = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }];
        let b = [Coord { x: 0.01, y: 0.0 }, Coord { x: 0.0, y: 0.0 }];
        cached.get_distance_matrix(&a).expect("first lookup");
        cached.get_distance_matrix(&b).expect("second lookup");
        cached.get_distance_matrix(&a).expect("cached lookup");
        assert_eq!(cached.misses(), 2);
        assert_eq!(cached.hits(), 1);
    }

    /// Returns a one-point matrix whatever it is asked for.
    struct Truncating;

    impl GeoDataProvider for Truncating {
        fn get_distance_matrix(&self, _: &[Coord<f64>]) -> Result<GeoMatrix, GeoDataError> {
            GeoMatrix::from_fn(1, |_, _| GeoEdge::default())
        }
    }

    #[rstest]
    fn wrong_sized_matrix_is_rejected_and_not_cached() {
        let cached = CachingGeoProvider::new(Truncating);
        let points = [Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }];
        for _ in 0..2 {
            assert_eq!(
                cached.get_distance_matrix(&points),
                Err(GeoDataError::SizeMismatch {
                    expected: 2,
                    found: 1
                })
            );
        }
        assert_eq!((cached.hits(), cached.misses()), (0, 2));
    }

    #[rstest]
    fn clear_forces_refetch() {
        let cached = CachingGeoProvider::new(StraightLineProvider::default());
        let points = [Coord { x: 0.0, y: 0.0 }];
        cached.get_distance_matrix(&points).expect("lookup");
        cached.clear();
        cached.get_distance_matrix(&points).expect("lookup after clear");
        assert_eq!(cached.misses(), 2);
    }
}

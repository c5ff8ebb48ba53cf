//! Distance and duration of one directed hop.

use serde::{Deserialize, Serialize};

/// Distance (metres) and duration (seconds) between two geo-points.
///
/// # Examples
/// ```
/// use courier_core::GeoEdge;
///
/// let edge = GeoEdge::new(1_500, 180);
/// assert_eq!(edge.duration_minutes(), 3.0);
/// assert_eq!(edge.distance_km(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoEdge {
    /// Road distance in metres.
    pub distance_m: i32,
    /// Travel duration in seconds.
    pub duration_s: i32,
}

impl GeoEdge {
    /// Construct an edge from metres and seconds.
    #[must_use]
    pub const fn new(distance_m: i32, duration_s: i32) -> Self {
        Self {
            distance_m,
            duration_s,
        }
    }

    /// Travel duration in minutes.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "route timing is expressed in fractional minutes"
    )]
    pub fn duration_minutes(self) -> f64 {
        f64::from(self.duration_s) / 60.0
    }

    /// Road distance in kilometres.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "tariffs are expressed per kilometre"
    )]
    pub fn distance_km(self) -> f64 {
        f64::from(self.distance_m) / 1000.0
    }
}

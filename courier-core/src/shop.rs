//! Shops that orders are dispatched from.

use chrono::{DateTime, NaiveTime, Utc};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Daily opening hours as UTC wall-clock times.
///
/// Snapshots carry every instant in UTC and no shop time zone, so `open` and
/// `close` are compared against the UTC time of day. Equal `open` and `close`
/// values mean the shop never closes. A `close` earlier than `open` describes
/// hours that run past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    /// Opening time, UTC.
    pub open: NaiveTime,
    /// Closing time, UTC.
    pub close: NaiveTime,
}

impl WorkingHours {
    /// Hours covering the whole day.
    #[must_use]
    pub const fn always() -> Self {
        Self {
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
        }
    }

    /// Report whether the shop is open at the UTC time of day `time`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveTime;
    /// use courier_core::WorkingHours;
    ///
    /// let late = WorkingHours {
    ///     open: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    ///     close: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
    /// };
    /// assert!(late.is_open_at(NaiveTime::from_hms_opt(1, 0, 0).unwrap()));
    /// assert!(!late.is_open_at(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    /// ```
    #[must_use]
    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        if self.open == self.close {
            return true;
        }
        if self.open < self.close {
            self.open <= time && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::always()
    }
}

/// A shop with pending orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    /// Unique identifier.
    pub id: u64,
    /// Pickup position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
    /// Opening hours.
    #[serde(default)]
    pub working_hours: WorkingHours,
}

impl Shop {
    /// Construct a shop that is always open.
    #[must_use]
    pub fn new(id: u64, location: Coord<f64>) -> Self {
        Self {
            id,
            location,
            working_hours: WorkingHours::always(),
        }
    }

    /// Report whether the shop is open at the instant `at`.
    #[must_use]
    pub fn is_open(&self, at: DateTime<Utc>) -> bool {
        self.working_hours.is_open_at(at.time())
    }
}

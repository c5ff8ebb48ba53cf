//! Delivery time windows and minute arithmetic on timestamps.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`TimeWindow::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    /// The window closes before it opens.
    #[error("time window ends at {to} before it starts at {from}")]
    Inverted {
        /// Requested start.
        from: DateTime<Utc>,
        /// Requested end.
        to: DateTime<Utc>,
    },
}

/// Closed interval `[from, to]` of UTC timestamps.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use courier_core::TimeWindow;
///
/// let from = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
/// let to = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// let window = TimeWindow::new(from, to)?;
/// let shifted = window.shifted_back(30.0).unwrap();
/// assert_eq!(shifted.from, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
/// # Ok::<(), courier_core::TimeWindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Earliest admissible instant.
    pub from: DateTime<Utc>,
    /// Latest admissible instant.
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`TimeWindowError::Inverted`] when `to < from`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if to < from {
            return Err(TimeWindowError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// Report whether `instant` lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }

    /// Move both bounds earlier by `minutes`.
    ///
    /// Returns `None` when the shift is not finite or leaves the supported
    /// timestamp range.
    #[must_use]
    pub fn shifted_back(&self, minutes: f64) -> Option<Self> {
        let delta = minutes_delta(minutes)?;
        Some(Self {
            from: self.from.checked_sub_signed(delta)?,
            to: self.to.checked_sub_signed(delta)?,
        })
    }
}

/// Convert fractional minutes into a millisecond-precision [`TimeDelta`].
///
/// Returns `None` for non-finite input or values outside chrono's range.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "route timing is tracked in fractional minutes and rounded to milliseconds"
)]
pub fn minutes_delta(minutes: f64) -> Option<TimeDelta> {
    if !minutes.is_finite() {
        return None;
    }
    let millis = (minutes * 60_000.0).round();
    if millis.abs() >= 9.0e15 {
        return None;
    }
    TimeDelta::try_milliseconds(millis as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn rejects_inverted_window() {
        let err = TimeWindow::new(at(12, 0), at(11, 0)).expect_err("inverted");
        assert!(matches!(err, TimeWindowError::Inverted { .. }));
    }

    #[rstest]
    #[case(at(10, 0), true)]
    #[case(at(12, 0), true)]
    #[case(at(12, 1), false)]
    fn contains_is_inclusive(#[case] instant: DateTime<Utc>, #[case] expected: bool) {
        let window = TimeWindow::new(at(10, 0), at(12, 0)).expect("valid window");
        assert_eq!(window.contains(instant), expected);
    }

    #[rstest]
    #[case(1.5, 90_000)]
    #[case(0.0, 0)]
    #[case(-2.0, -120_000)]
    fn converts_minutes_to_millis(#[case] minutes: f64, #[case] millis: i64) {
        assert_eq!(
            minutes_delta(minutes).map(|d| d.num_milliseconds()),
            Some(millis)
        );
    }

    #[rstest]
    fn rejects_non_finite_minutes() {
        assert!(minutes_delta(f64::NAN).is_none());
        assert!(minutes_delta(f64::INFINITY).is_none());
    }
}

//! Start-interval intersection over the delivery windows of a route.

use chrono::{DateTime, TimeDelta, Utc};
use courier_core::{DeliveryInterval, Order};

use super::error::WindowConflict;

/// Width of the start interval when no order constrains it.
pub const UNBOUNDED_START_SPAN: TimeDelta = TimeDelta::hours(2);

/// Intersect the start times allowed by each order's window.
///
/// An order reached `node_minutes` after the start accepts starts in its
/// window shifted back by that amount. The interval opens at `calc_time`;
/// orders with the time check disabled do not narrow it.
pub(crate) fn start_interval(
    calc_time: DateTime<Utc>,
    orders: &[&Order],
    node_minutes: &[f64],
) -> Result<DeliveryInterval, WindowConflict> {
    let mut earliest = calc_time;
    let mut latest: Option<DateTime<Utc>> = None;
    for (order, minutes) in orders.iter().zip(node_minutes) {
        if !order.time_check_enabled() {
            continue;
        }
        let shifted = order
            .window
            .shifted_back(*minutes)
            .ok_or(WindowConflict::OutOfRange { order_id: order.id })?;
        earliest = earliest.max(shifted.from);
        let bound = latest.map_or(shifted.to, |current| current.min(shifted.to));
        if earliest > bound {
            return Err(WindowConflict::Disjoint { order_id: order.id });
        }
        latest = Some(bound);
    }

    match latest {
        Some(bound) if calc_time > bound => Err(WindowConflict::Expired { latest: bound }),
        Some(bound) => Ok(DeliveryInterval {
            earliest,
            latest: bound,
        }),
        None => Ok(DeliveryInterval {
            earliest,
            latest: earliest
                .checked_add_signed(UNBOUNDED_START_SPAN)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }),
    }
}

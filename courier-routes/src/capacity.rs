//! Up-front sizing of the best-route map.

/// Largest pre-allocation, in entries.
pub const MAX_PRESIZE: usize = 1 << 22;

/// Smallest order count, per route length, from which the estimate is
/// clamped to [`MAX_PRESIZE`] without summing binomials.
const CLAMP_THRESHOLDS: [(usize, usize); 7] = [
    (8, 30),
    (7, 35),
    (6, 44),
    (5, 64),
    (4, 119),
    (3, 365),
    (2, 4_096),
];

/// Expected number of distinct bundles for `order_count` orders and routes
/// of up to `max_len` orders.
///
/// Half the number of subsets of size `1..=max_len`, never below the number
/// of single-order routes.
///
/// # Examples
/// ```
/// use courier_routes::{MAX_PRESIZE, estimated_capacity};
///
/// // 4 + 6 + 4 subsets, halved.
/// assert_eq!(estimated_capacity(4, 3), 7);
/// assert_eq!(estimated_capacity(10, 1), 10);
/// assert_eq!(estimated_capacity(30, 8), MAX_PRESIZE);
/// ```
#[must_use]
pub fn estimated_capacity(order_count: usize, max_len: usize) -> usize {
    if order_count == 0 || max_len == 0 {
        return 0;
    }
    let clamped = CLAMP_THRESHOLDS
        .iter()
        .any(|(len, threshold)| *len == max_len && order_count >= *threshold);
    if clamped {
        return MAX_PRESIZE;
    }
    let subsets = (1..=max_len.min(order_count))
        .map(|size| binomial(order_count, size))
        .fold(0_usize, usize::saturating_add);
    half(subsets).max(order_count)
}

#[expect(clippy::integer_division, reason = "halving rounds down")]
const fn half(value: usize) -> usize {
    value / 2
}

/// `n` choose `k`, saturating at `usize::MAX`.
#[expect(
    clippy::integer_division,
    reason = "each partial product is divisible by the running denominator"
)]
fn binomial(n: usize, k: usize) -> usize {
    let mut acc: u128 = 1;
    for step in 0..k {
        let Ok(numerator) = u128::try_from(n - step) else {
            return usize::MAX;
        };
        let Ok(denominator) = u128::try_from(step + 1) else {
            return usize::MAX;
        };
        acc = acc.saturating_mul(numerator) / denominator;
    }
    usize::try_from(acc).unwrap_or(usize::MAX)
}

//! Wraparound arithmetic shared by the projector and the strategies.

/// Non-negative remainder of `dividend / divisor`, for negative dividends too.
///
/// Returns `None` when `divisor` is 0. Callers treat that as "no slides to wrap
/// around" and abandon whatever step needed the result.
#[inline]
pub fn modulo(dividend: i64, divisor: i64) -> Option<i64> {
    dividend.checked_rem_euclid(divisor)
}

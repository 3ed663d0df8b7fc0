/// Converts an `f64` to a `usize` if and only if it is an exact,
/// non-negative integer in range.
///
/// Rejects NaN, infinities, negative values, fractional values, and values
/// too large for `usize` (`-0.0` equals zero and is accepted). Used for
/// counts coming from the language, where `2.0` means 2 but `1.5` and
/// `-1.0` are errors.
///
/// ## Parameters
/// - `value`: The number to convert.
///
/// ## Returns
/// - `Some(usize)`: The exact count.
/// - `None`: If the value is not a representable non-negative integer.
///
/// ## Example
/// ```
/// use rill::util::num::f64_to_usize_exact;
///
/// assert_eq!(f64_to_usize_exact(3.0), Some(3));
/// assert_eq!(f64_to_usize_exact(1.5), None);
/// assert_eq!(f64_to_usize_exact(-1.0), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_usize_exact(value: f64) -> Option<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 {
        return None;
    }
    if value > usize::MAX as f64 {
        return None;
    }
    Some(value as usize)
}

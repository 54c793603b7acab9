//! Rescaling of raw attribute values onto the `0..=100` scale.
#![forbid(unsafe_code)]

use capecod_core::RangeSpec;

/// Rescale `value` from its schema range onto `0..=100`.
///
/// Values are passed through unchanged when the range lacks either bound or
/// when both bounds are equal. Values outside the range are not clamped and
/// produce scores below 0 or above 100.
///
/// # Examples
/// ```
/// use capecod_core::RangeSpec;
/// use capecod_scorer::normalize;
///
/// assert_eq!(normalize(10.0, &RangeSpec::bounded(1.0, 10.0)), 100.0);
/// assert_eq!(normalize(42.0, &RangeSpec::unbounded()), 42.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "linear rescaling divides by the width of the range"
)]
pub fn normalize(value: f64, range: &RangeSpec) -> f64 {
    match range.bounds() {
        Some((min, max)) if !is_degenerate(range) => ((value - min) / (max - min)) * 100.0,
        _ => value,
    }
}

/// Report whether both bounds exist and are equal, leaving no width to
/// rescale against.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the width of a range is the difference of its bounds"
)]
pub fn is_degenerate(range: &RangeSpec) -> bool {
    range.bounds().is_some_and(|(min, max)| max - min == 0.0)
}

/// Report whether `value` lies within the range's bounds, when it has any.
#[must_use]
pub fn within_range(value: f64, range: &RangeSpec) -> bool {
    range
        .bounds()
        .is_none_or(|(min, max)| (min..=max).contains(&value))
}

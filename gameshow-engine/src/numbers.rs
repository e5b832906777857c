//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f32 and clamp it to the usize range, returning 0 for negative
/// or non-finite values.
#[must_use]
pub fn floor_f32_to_usize(value: f32) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    cast::<f32, usize>(value.floor()).unwrap_or(0)
}

/// Convert usize to f32 while allowing precision loss in a single location.
///
/// Exact for every value a wheel can produce (counts and indices are tiny).
#[must_use]
pub fn usize_to_f32(value: usize) -> f32 {
    cast::<usize, f32>(value).unwrap_or(f32::MAX)
}

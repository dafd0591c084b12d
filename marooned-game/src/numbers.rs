//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f32 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn floor_f32_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f32>(i32::MIN).unwrap_or(f32::MIN);
    let max = cast::<i32, f32>(i32::MAX).unwrap_or(f32::MAX);
    let clamped = value.clamp(min, max).floor();
    cast::<f32, i32>(clamped).unwrap_or(0)
}

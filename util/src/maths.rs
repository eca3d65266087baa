//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Saturate a value to the range `[min, max]`.
///
/// Values below `min` are raised to `min`, values above `max` are lowered to `max`, and values
/// inside the range are returned unchanged.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Saturate a value to the symmetric range `[-limit, limit]`.
///
/// Returns the saturated value and whether or not it was limited.
pub fn clamp_abs<T>(value: T, limit: T) -> (T, bool)
where
    T: Float
{
    let ret = clamp(&value, &-limit, &limit);

    (ret, ret != value)
}

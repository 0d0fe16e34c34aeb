//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`, also returning `true` if the value had to be
/// limited.
///
/// NaN values are passed through unchanged.
pub fn limit<T>(value: T, min: T, max: T) -> (T, bool)
where
    T: Float
{
    if value > max {
        (max, true)
    }
    else if value < min {
        (min, true)
    }
    else {
        (value, false)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_limit() {
        assert_eq!(limit(5f64, 0f64, 20f64), (5f64, false));
        assert_eq!(limit(21f64, 0f64, 20f64), (20f64, true));
        assert_eq!(limit(-1f64, 0f64, 20f64), (0f64, true));
        assert_eq!(limit(20f64, 0f64, 20f64), (20f64, false));
        assert!(limit(f64::NAN, 0f64, 1f64).0.is_nan());
    }
}

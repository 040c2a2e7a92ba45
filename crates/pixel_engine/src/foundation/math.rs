//! Math utilities and types
//!
//! Provides the 2D vector type used for positions and velocities, plus the
//! small scalar helpers the movement code leans on.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Move `current` towards `target` by at most `step`, never overshooting.
///
/// A negative `step` is treated as its absolute value.
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    let step = step.abs();
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Integer sign of `value`: -1, 0 or 1
pub const fn sign(value: i32) -> i32 {
    value.signum()
}

/// Split `value` into its integer part (truncated toward zero) and the
/// fractional leftover, such that `whole as f32 + fraction == value`.
pub fn split_whole(value: f32) -> (i32, f32) {
    let whole = value.trunc();
    (whole as i32, value - whole)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_approach_does_not_overshoot() {
        assert_relative_eq!(approach(10.0, 0.0, 3.0), 7.0);
        assert_relative_eq!(approach(2.0, 0.0, 3.0), 0.0);
        assert_relative_eq!(approach(-2.0, 0.0, 3.0), 0.0);
        assert_relative_eq!(approach(-10.0, 0.0, 3.0), -7.0);
    }

    #[test]
    fn test_approach_negative_step() {
        assert_relative_eq!(approach(5.0, 0.0, -1.0), 4.0);
    }

    #[test]
    fn test_split_whole_truncates_toward_zero() {
        let (whole, fraction) = split_whole(2.75);
        assert_eq!(whole, 2);
        assert_relative_eq!(fraction, 0.75);

        let (whole, fraction) = split_whole(-2.75);
        assert_eq!(whole, -2);
        assert_relative_eq!(fraction, -0.75);

        let (whole, fraction) = split_whole(0.4);
        assert_eq!(whole, 0);
        assert_relative_eq!(fraction, 0.4);
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(-7), -1);
        assert_eq!(sign(0), 0);
        assert_eq!(sign(3), 1);
    }
}

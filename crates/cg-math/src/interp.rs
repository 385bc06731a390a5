//! Scalar interpolation helpers.
//!
//! ```rust
//! use cg_math::{clamp, lerp};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(clamp(95.0, -89.0, 89.0), 89.0);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
///
/// # Example
///
/// ```rust
/// use cg_math::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
/// assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
/// A zero-width range maps everything to `0.0`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < 1e-10 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamps a value to the range [min, max].
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Hermite smoothstep.
///
/// Returns 0 for `x <= edge0`, 1 for `x >= edge1`, and eases in between.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate(inverse_lerp(edge0, edge1, x));
    t * t * (3.0 - 2.0 * t)
}

/// Wraps an angle in radians into `[0, 2pi)`.
///
/// # Example
///
/// ```rust
/// use cg_math::wrap_radians;
/// use std::f32::consts::PI;
///
/// assert!((wrap_radians(-PI / 2.0) - 1.5 * PI).abs() < 1e-6);
/// ```
#[inline]
pub fn wrap_radians(angle: f32) -> f32 {
    let tau = std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(tau);
    // rem_euclid rounds tiny negative angles up to exactly tau
    if wrapped >= tau { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 4.0, 2.0), 6.0);
    }

    #[test]
    fn test_inverse_lerp() {
        assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
        assert_eq!(inverse_lerp(3.0, 3.0, 7.0), 0.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-100.0, -89.0, 89.0), -89.0);
        assert_eq!(clamp(10.0, -89.0, 89.0), 10.0);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(-0.5), 0.0);
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!(smoothstep(0.0, 1.0, 0.25) < 0.25);
    }

    #[test]
    fn test_wrap_radians() {
        assert_eq!(wrap_radians(0.0), 0.0);
        assert!((wrap_radians(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_radians(-PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_radians_stays_below_tau() {
        for angle in [-1e-8, -f32::EPSILON, -1e-30, -TAU * 3.0 - 1e-7] {
            let w = wrap_radians(angle);
            assert!((0.0..TAU).contains(&w), "wrap_radians({angle}) = {w}");
        }
        assert_eq!(wrap_radians(-1e-8), 0.0);
    }
}

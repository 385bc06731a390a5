//! Angle constants and degree/radian conversion.
//!
//! The public API of `cg-math` takes angles in **degrees** (field of view,
//! axis-angle rotations, camera yaw/pitch), matching how the render loops
//! configure cameras. Conversions happen once, internally.

/// Pi as `f32`.
pub const PI: f32 = std::f32::consts::PI;

/// Half of pi.
pub const PI_HALF: f32 = std::f32::consts::FRAC_PI_2;

/// Multiply degrees by this to get radians.
pub const RAD: f32 = PI / 180.0;

/// Multiply radians by this to get degrees.
pub const DEG: f32 = 180.0 / PI;

/// Tolerance used by the checked (`try_*`) operations.
pub const EPSILON: f32 = 1e-6;

/// Converts degrees to radians.
///
/// # Example
///
/// ```rust
/// use cg_core::to_radians;
///
/// assert!((to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
/// ```
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * RAD
}

/// Converts radians to degrees.
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * DEG
}

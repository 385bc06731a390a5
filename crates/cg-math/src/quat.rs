//! Quaternion type for rotations and their interpolation.
//!
//! A [`Quat`] is a scalar part `r` plus a vector part `v`. Unit quaternions
//! represent rotations; [`Quat::slerp`] interpolates between two of them at
//! constant angular velocity.
//!
//! # Usage
//!
//! ```rust
//! use cg_math::{Quat, Vec3};
//!
//! let quarter_turn = Quat::from_axis_angle(Vec3::Y, 90.0);
//! let rotated = quarter_turn.rotate_vector(Vec3::X);
//! assert!(rotated.abs_diff_eq(-Vec3::Z, 1e-6));
//!
//! let eighth_turn = Quat::slerp(Quat::IDENTITY, quarter_turn, 0.5);
//! ```

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{lerp, Vec3};

/// Below this angle between two quaternions SLERP degrades to a lerp.
const SLERP_EPSILON: f32 = 1e-4;

/// A quaternion `r + v.x i + v.y j + v.z k`.
///
/// Memory layout is `[x, y, z, w]` (vector part first), the order used by
/// glTF and glam.
///
/// Arithmetic (`+`, `-`, scaling) may leave the unit sphere; call
/// [`Quat::normalize`] before interpreting the result as a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat {
    /// Vector (imaginary) part
    pub v: Vec3,
    /// Scalar (real) part
    pub r: f32,
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::from_parts(1.0, Vec3::ZERO);

    /// Creates a quaternion from scalar and imaginary components.
    #[inline]
    pub const fn new(r: f32, i: f32, j: f32, k: f32) -> Self {
        Self::from_parts(r, Vec3::new(i, j, k))
    }

    /// Creates a quaternion from its scalar and vector parts.
    #[inline]
    pub const fn from_parts(r: f32, v: Vec3) -> Self {
        Self { v, r }
    }

    /// Rotation of `degrees` around `axis`.
    ///
    /// The axis is normalized here, so the result is a unit quaternion for
    /// any non-zero axis. The angle is halved internally.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_math::{Quat, Vec3};
    ///
    /// let q = Quat::from_axis_angle(Vec3::new(0.0, 10.0, 0.0), 180.0);
    /// assert!((q.magnitude() - 1.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Self {
        let half = cg_core::to_radians(degrees) * 0.5;
        let (sin, cos) = half.sin_cos();
        Self::from_parts(cos, sin * axis.normalized())
    }

    /// Reads `[x, y, z, w]` from a float slice, the same order as storage.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than four floats.
    #[inline]
    pub fn from_slice(s: &[f32]) -> Self {
        Self::from_parts(s[3], Vec3::from_slice(&s[..3]))
    }

    /// Returns `[x, y, z, w]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.v.x(), self.v.y(), self.v.z(), self.r]
    }

    /// Borrows the storage as `[x, y, z, w]`.
    #[inline]
    pub fn as_array(&self) -> &[f32; 4] {
        bytemuck::cast_ref(self)
    }

    /// Dot product: `r1 r2 + v1.v2`.
    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.r * rhs.r + self.v.dot(rhs.v)
    }

    /// Norm of the quaternion.
    #[inline]
    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalizes in place. A zero quaternion becomes all-NaN.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.magnitude();
        *self /= len;
        self
    }

    /// Returns a unit-length copy. Same zero-length contract as [`Quat::normalize`].
    #[inline]
    pub fn normalized(self) -> Self {
        self / self.magnitude()
    }

    /// Returns a unit-length copy, or [`cg_core::Error::ZeroLength`].
    #[inline]
    pub fn try_normalized(self) -> cg_core::Result<Self> {
        let len = self.magnitude();
        if len <= cg_core::EPSILON || !len.is_finite() {
            return Err(cg_core::Error::ZeroLength);
        }
        Ok(self / len)
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::from_parts(self.r, -self.v)
    }

    /// Multiplicative inverse: conjugate over squared norm.
    ///
    /// Equal to [`Quat::conjugate`] for unit quaternions.
    #[inline]
    pub fn inverse(self) -> Self {
        self.conjugate() / self.dot(self)
    }

    /// Rotates a vector by this (unit) quaternion.
    ///
    /// Equivalent to `q * (0, v) * q^-1` but without the full products.
    #[inline]
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let t = 2.0 * self.v.cross(v);
        v + self.r * t + self.v.cross(t)
    }

    /// Spherical linear interpolation.
    ///
    /// Follows the shortest arc: when `q1.q2 < 0` the second operand is
    /// negated first. Nearly parallel inputs fall back to a component-wise
    /// lerp, which is returned unnormalized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_math::{Quat, Vec3};
    ///
    /// let a = Quat::IDENTITY;
    /// let b = Quat::from_axis_angle(Vec3::Z, 90.0);
    /// assert_eq!(Quat::slerp(a, b, 0.0), a);
    /// let half = Quat::slerp(a, b, 0.5);
    /// let expected = Quat::from_axis_angle(Vec3::Z, 45.0);
    /// assert!((half.dot(expected) - 1.0).abs() < 1e-6);
    /// ```
    pub fn slerp(q1: Self, q2: Self, t: f32) -> Self {
        let mut target = q2;
        let mut cos_theta = q1.dot(q2);

        if cos_theta < 0.0 {
            target = -q2;
            cos_theta = -cos_theta;
        }

        if cos_theta > 1.0 - SLERP_EPSILON {
            return Self::new(
                lerp(q1.r, target.r, t),
                lerp(q1.v.x(), target.v.x(), t),
                lerp(q1.v.y(), target.v.y(), t),
                lerp(q1.v.z(), target.v.z(), t),
            );
        }

        let angle = cos_theta.acos();
        (((1.0 - t) * angle).sin() * q1 + (t * angle).sin() * target) / angle.sin()
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.v.is_finite()
    }

    /// Component-wise comparison within an absolute tolerance.
    #[inline]
    pub fn abs_diff_eq(self, other: Self, eps: f32) -> bool {
        (self.r - other.r).abs() <= eps && self.v.abs_diff_eq(other.v, eps)
    }

    /// Converts to glam Quat.
    #[inline]
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_array(self.to_array())
    }

    /// Creates from glam Quat.
    #[inline]
    pub fn from_glam(q: glam::Quat) -> Self {
        Self::from_slice(&q.to_array())
    }
}

/// Free-function form of [`Quat::slerp`].
#[inline]
pub fn slerp(q1: Quat, q2: Quat, t: f32) -> Quat {
    Quat::slerp(q1, q2, t)
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Index 0 is the scalar part, 1..=3 the vector part.
impl Index<usize> for Quat {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        if i == 0 { &self.r } else { &self.v[i - 1] }
    }
}

impl IndexMut<usize> for Quat {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        if i == 0 { &mut self.r } else { &mut self.v[i - 1] }
    }
}

// Hamilton product
impl Mul for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_parts(
            self.r * rhs.r - self.v.dot(rhs.v),
            self.r * rhs.v + rhs.r * self.v + self.v.cross(rhs.v),
        )
    }
}

impl MulAssign for Quat {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Quat * Vec3 rotates the vector
impl Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate_vector(rhs)
    }
}

impl Add for Quat {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_parts(self.r + rhs.r, self.v + rhs.v)
    }
}

impl Sub for Quat {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_parts(self.r - rhs.r, self.v - rhs.v)
    }
}

impl Neg for Quat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_parts(-self.r, -self.v)
    }
}

impl Mul<f32> for Quat {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::from_parts(self.r * rhs, self.v * rhs)
    }
}

impl Mul<Quat> for f32 {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: Quat) -> Quat {
        rhs * self
    }
}

impl Div<f32> for Quat {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::from_parts(self.r / rhs, self.v / rhs)
    }
}

impl AddAssign for Quat {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quat {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Quat {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Quat {
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl From<glam::Quat> for Quat {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quat> for glam::Quat {
    #[inline]
    fn from(q: Quat) -> glam::Quat {
        q.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_quat_eq(a: Quat, b: Quat) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn test_quat_layout() {
        let q = Quat::new(4.0, 1.0, 2.0, 3.0);
        assert_eq!(q.as_array(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Quat::from_slice(&[1.0, 2.0, 3.0, 4.0]), q);
        assert_eq!(q[0], 4.0);
        assert_eq!(q[2], 2.0);
    }

    #[test]
    fn test_quat_from_axis_angle() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 3.0, 0.0), 90.0);
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert_quat_eq(q, Quat::new(h, 0.0, h, 0.0));
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quat_rotate_vector() {
        let q = Quat::from_axis_angle(Vec3::Y, 90.0);
        assert!(q.rotate_vector(Vec3::X).abs_diff_eq(-Vec3::Z, 1e-6));
        assert!((q * Vec3::Z).abs_diff_eq(Vec3::X, 1e-6));
        assert!(q.rotate_vector(Vec3::Y).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_quat_hamilton_product() {
        // i * j = k, j * i = -k
        let i = Quat::new(0.0, 1.0, 0.0, 0.0);
        let j = Quat::new(0.0, 0.0, 1.0, 0.0);
        let k = Quat::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quat::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_quat_product_composes_rotations() {
        let a = Quat::from_axis_angle(Vec3::Y, 90.0);
        let b = Quat::from_axis_angle(Vec3::X, 90.0);
        let v = Vec3::new(0.3, -1.0, 2.0);
        // (a * b) applies b first, then a.
        let composed = (a * b).rotate_vector(v);
        let sequential = a.rotate_vector(b.rotate_vector(v));
        assert!(composed.abs_diff_eq(sequential, 1e-5));
    }

    #[test]
    fn test_quat_matches_glam_product() {
        let a = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 33.0);
        let b = Quat::from_axis_angle(Vec3::new(-1.0, 0.5, 0.0), 71.0);
        let ours = a * b;
        let theirs = Quat::from_glam(a.to_glam() * b.to_glam());
        assert_quat_eq(ours, theirs);
    }

    #[test]
    fn test_quat_conjugate_inverse() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.conjugate(), Quat::new(1.0, -2.0, -3.0, -4.0));
        assert_quat_eq(q * q.inverse(), Quat::IDENTITY);

        let unit = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 40.0);
        assert_quat_eq(unit.inverse(), unit.conjugate());
    }

    #[test]
    fn test_quat_normalize() {
        let mut q = Quat::new(2.0, 0.0, 0.0, 0.0);
        q.normalize();
        assert_eq!(q, Quat::IDENTITY);

        let zero = Quat::new(0.0, 0.0, 0.0, 0.0);
        assert!(!zero.normalized().is_finite());
        assert!(zero.try_normalized().is_err());
    }

    #[test]
    fn test_quat_arithmetic() {
        let a = Quat::new(1.0, 2.0, 3.0, 4.0);
        let b = Quat::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(a + b - b, a);
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!((a * 2.0) / 2.0, a);

        let mut c = a;
        c += b;
        c -= a;
        c *= 4.0;
        c /= 2.0;
        assert_eq!(c, Quat::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Quat::from_axis_angle(Vec3::Y, 10.0);
        let b = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 120.0);
        assert_quat_eq(Quat::slerp(a, b, 0.0), a);
        assert_quat_eq(Quat::slerp(a, b, 1.0), b);
    }

    #[test]
    fn test_slerp_same_quaternion() {
        let q = Quat::from_axis_angle(Vec3::new(0.2, -1.0, 0.4), 63.0);
        assert_quat_eq(slerp(q, q, 0.5), q);
    }

    #[test]
    fn test_slerp_midpoint_is_half_angle() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::X, 120.0);
        let mid = Quat::slerp(a, b, 0.5);
        assert_quat_eq(mid, Quat::from_axis_angle(Vec3::X, 60.0));
        assert_relative_eq!(mid.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_takes_short_path() {
        let a = Quat::IDENTITY;
        let b = -Quat::from_axis_angle(Vec3::Z, 90.0);
        assert!(a.dot(b) < 0.0);
        let mid = Quat::slerp(a, b, 0.5);
        assert_quat_eq(mid, Quat::from_axis_angle(Vec3::Z, 45.0));
    }

    #[test]
    fn test_slerp_matches_glam() {
        let a = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 1.0), 20.0);
        let b = Quat::from_axis_angle(Vec3::new(0.0, 1.0, -1.0), 150.0);
        for t in [0.1, 0.25, 0.6, 0.9] {
            let ours = Quat::slerp(a, b, t);
            let theirs = Quat::from_glam(a.to_glam().slerp(b.to_glam(), t));
            assert!(ours.abs_diff_eq(theirs, 1e-4), "t = {t}");
        }
    }
}

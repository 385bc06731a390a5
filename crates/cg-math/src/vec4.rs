//! 4D vector type for homogeneous coordinates and matrix rows.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::macros::impl_vector;
use crate::Vec3;

/// A 4D vector.
///
/// Used for homogeneous points (`w = 1`), directions (`w = 0`), RGBA colors
/// and as the row type of [`crate::Mat4`].
///
/// # Example
///
/// ```rust
/// use cg_math::{Vec3, Vec4};
///
/// let p = Vec3::new(1.0, 2.0, 3.0).extend(1.0);
/// assert_eq!(p, Vec4::new(1.0, 2.0, 3.0, 1.0));
/// assert_eq!(p.truncate(), Vec3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Vec4(pub(crate) [f32; 4]);

impl_vector!(Vec4, 4);

impl Vec4 {
    /// Unit X vector (1, 0, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Unit Y vector (0, 1, 0, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0, 0.0);

    /// Unit Z vector (0, 0, 1, 0).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0, 0.0);

    /// Unit W vector (0, 0, 0, 1).
    pub const W: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// X component.
    #[inline]
    pub const fn x(self) -> f32 {
        self.0[0]
    }

    /// Y component.
    #[inline]
    pub const fn y(self) -> f32 {
        self.0[1]
    }

    /// Z component.
    #[inline]
    pub const fn z(self) -> f32 {
        self.0[2]
    }

    /// W component.
    #[inline]
    pub const fn w(self) -> f32 {
        self.0[3]
    }

    /// Mutable X component.
    #[inline]
    pub fn x_mut(&mut self) -> &mut f32 {
        &mut self.0[0]
    }

    /// Mutable Y component.
    #[inline]
    pub fn y_mut(&mut self) -> &mut f32 {
        &mut self.0[1]
    }

    /// Mutable Z component.
    #[inline]
    pub fn z_mut(&mut self) -> &mut f32 {
        &mut self.0[2]
    }

    /// Mutable W component.
    #[inline]
    pub fn w_mut(&mut self) -> &mut f32 {
        &mut self.0[3]
    }

    /// Drops `w`.
    #[inline]
    pub const fn truncate(self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Converts to glam Vec4.
    #[inline]
    pub fn to_glam(self) -> glam::Vec4 {
        glam::Vec4::from_array(self.0)
    }

    /// Creates from glam Vec4.
    #[inline]
    pub fn from_glam(v: glam::Vec4) -> Self {
        Self(v.to_array())
    }
}

impl From<glam::Vec4> for Vec4 {
    #[inline]
    fn from(v: glam::Vec4) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec4> for glam::Vec4 {
    #[inline]
    fn from(v: Vec4) -> glam::Vec4 {
        v.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec4_components() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.w(), 4.0);
        assert_eq!(v[3], 4.0);
        *v.w_mut() = 0.0;
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn test_vec4_broadcast() {
        assert_eq!(Vec4::splat(2.0), Vec4::new(2.0, 2.0, 2.0, 2.0));
        assert_eq!(Vec4::default(), Vec4::ZERO);
    }

    #[test]
    fn test_vec4_magnitude_normalize() {
        let v = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(v.magnitude(), 2.0);
        assert_eq!(v.normalized(), Vec4::splat(0.5));
        assert_relative_eq!(
            Vec4::new(0.3, -2.0, 5.0, 1.0).normalized().magnitude(),
            1.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_vec4_dot() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a.dot(Vec4::ONE), 10.0);
        assert_eq!(a.dot(Vec4::W), 4.0);
    }

    #[test]
    fn test_vec4_ops() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Vec4::ZERO);
        assert_eq!(0.5 * a, a / 2.0);
        assert_eq!(-a + a, Vec4::ZERO);
    }

    #[test]
    fn test_vec4_extend_truncate() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.extend(0.0).truncate(), v);
        assert_eq!(v.extend(1.0).w(), 1.0);
    }
}

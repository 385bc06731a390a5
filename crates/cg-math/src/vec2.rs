//! 2D vector type for texture coordinates and screen-space values.

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::macros::impl_vector;

/// A 2D vector.
///
/// # Example
///
/// ```rust
/// use cg_math::Vec2;
///
/// let uv = Vec2::new(0.25, 0.75);
/// assert_eq!(uv[0], uv.x());
/// assert_eq!((uv * 4.0).to_array(), [1.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Vec2(pub(crate) [f32; 2]);

impl_vector!(Vec2, 2);

impl Vec2 {
    /// Unit X vector (1, 0).
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit Y vector (0, 1).
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self([x, y])
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

    /// Converts to glam Vec2.
    #[inline]
    pub fn to_glam(self) -> glam::Vec2 {
        glam::Vec2::from_array(self.0)
    }

    /// Creates from glam Vec2.
    #[inline]
    pub fn from_glam(v: glam::Vec2) -> Self {
        Self(v.to_array())
    }
}

impl From<glam::Vec2> for Vec2 {
    #[inline]
    fn from(v: glam::Vec2) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec2> for glam::Vec2 {
    #[inline]
    fn from(v: Vec2) -> glam::Vec2 {
        v.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_new() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.x(), 3.0);
        assert_eq!(v.y(), 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let mut v = Vec2::new(3.0, 4.0);
        v.normalize();
        assert!(v.abs_diff_eq(Vec2::new(0.6, 0.8), 1e-6));
        assert!(Vec2::ZERO.normalized().x().is_nan());
    }

    #[test]
    fn test_vec2_dot() {
        assert_eq!(Vec2::new(1.0, 2.0).dot(Vec2::new(3.0, 4.0)), 11.0);
        assert_eq!(Vec2::X.dot(Vec2::Y), 0.0);
    }

    #[test]
    fn test_vec2_ops() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::ONE;
        v *= 3.0;
        assert_eq!(v, Vec2::new(6.0, 9.0));
        v -= Vec2::splat(1.0);
        v /= 5.0;
        assert_eq!(v, Vec2::new(1.0, 1.6));
    }

    #[test]
    fn test_vec2_mutable_accessors() {
        let mut v = Vec2::ZERO;
        *v.x_mut() = 2.0;
        v[1] = 3.0;
        assert_eq!(v, Vec2::from([2.0, 3.0]));
    }
}

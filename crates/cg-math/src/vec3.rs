//! 3D vector type for positions, directions and normals.
//!
//! [`Vec3`] is the workhorse of the library: vertex positions, surface
//! normals, camera vectors and light colors are all `Vec3`.
//!
//! # Usage
//!
//! ```rust
//! use cg_math::Vec3;
//!
//! let edge_a = Vec3::new(1.0, 0.0, 0.0);
//! let edge_b = Vec3::new(0.0, 1.0, 0.0);
//! let normal = edge_a.cross(edge_b).normalized();
//! assert_eq!(normal, Vec3::Z);
//! ```

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::macros::impl_vector;
use crate::Vec4;

/// A 3D vector.
///
/// # Components
///
/// Storage is a contiguous `[f32; 3]`. Access via `.x()`, `.y()`, `.z()` or
/// index `[0]`, `[1]`, `[2]`; both read the same floats.
///
/// # Example
///
/// ```rust
/// use cg_math::Vec3;
///
/// let mut v = Vec3::new(3.0, 0.0, 4.0);
/// assert_eq!(v.magnitude(), 5.0);
/// assert_eq!(v[2], v.z());
///
/// *v.y_mut() = 1.0;
/// assert_eq!(v.as_array(), &[3.0, 1.0, 4.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Vec3(pub(crate) [f32; 3]);

impl_vector!(Vec3, 3);

impl Vec3 {
    /// Unit X vector (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
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

    /// Cross product.
    ///
    /// Anticommutative: `a.cross(b) == -b.cross(a)`. The result is
    /// orthogonal to both operands and follows the right-hand rule.
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y() * rhs.z() - self.z() * rhs.y(),
            self.z() * rhs.x() - self.x() * rhs.z(),
            self.x() * rhs.y() - self.y() * rhs.x(),
        )
    }

    /// Extends to a [`Vec4`] with the given `w`.
    ///
    /// `w = 1` for points (affected by translation), `w = 0` for directions.
    #[inline]
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x(), self.y(), self.z(), w)
    }

    /// Component-wise product, e.g. a light color modulating a surface color.
    #[inline]
    pub fn component_mul(self, rhs: Self) -> Self {
        Self::new(self.x() * rhs.x(), self.y() * rhs.y(), self.z() * rhs.z())
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x().min(other.x()),
            self.y().min(other.y()),
            self.z().min(other.z()),
        )
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x().max(other.x()),
            self.y().max(other.y()),
            self.z().max(other.z()),
        )
    }

    /// Clamps each component to [min, max].
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Converts to glam Vec3.
    #[inline]
    pub fn to_glam(self) -> glam::Vec3 {
        glam::Vec3::from_array(self.0)
    }

    /// Creates from glam Vec3.
    #[inline]
    pub fn from_glam(v: glam::Vec3) -> Self {
        Self(v.to_array())
    }
}

impl From<glam::Vec3> for Vec3 {
    #[inline]
    fn from(v: glam::Vec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec3> for glam::Vec3 {
    #[inline]
    fn from(v: Vec3) -> glam::Vec3 {
        v.to_glam()
    }
}

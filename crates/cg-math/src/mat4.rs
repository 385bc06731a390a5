//! 4x4 matrix type for affine and projective transforms.
//!
//! [`Mat4`] holds model, view and projection matrices. It is built from
//! translations, scales and quaternion rotations, composed by
//! multiplication and inverted through a cofactor expansion.
//!
//! # Convention
//!
//! Matrices are stored **row-major** and use **row vectors**:
//!
//! ```text
//!                 | m00 m01 m02 m03 |
//! [x y z w]   *   | m10 m11 m12 m13 |   =   x*row0 + y*row1 + z*row2 + w*row3
//!                 | m20 m21 m22 m23 |
//!                 | m30 m31 m32 m33 |
//! ```
//!
//! Translation lives in row 3, and `p * (A * B) == (p * A) * B`, so in a
//! product the left operand applies first. The 16 floats in memory are the
//! same as an OpenGL column-major, column-vector matrix, so [`Mat4::as_array`]
//! can be uploaded with `transpose = GL_FALSE`.
//!
//! # Usage
//!
//! ```rust
//! use cg_math::{Mat4, Quat, Vec3};
//!
//! let mut model = Mat4::IDENTITY;
//! model
//!     .translate(Vec3::new(10.0, 0.0, 0.0))
//!     .rotate(Quat::from_axis_angle(Vec3::Y, 90.0))
//!     .scale(Vec3::splat(2.0));
//!
//! // Scale, then rotate, then translate.
//! let p = model.transform_point(Vec3::X);
//! assert!(p.abs_diff_eq(Vec3::new(10.0, 0.0, -2.0), 1e-5));
//!
//! let back = model.inverse().transform_point(p);
//! assert!(back.abs_diff_eq(Vec3::X, 1e-5));
//! ```

use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Index, IndexMut, Mul, MulAssign, Neg, Sub};

use crate::{Quat, Vec3, Vec4};

/// A 4x4 matrix of four [`Vec4`] rows.
///
/// `Default` is the zero matrix; use [`Mat4::IDENTITY`] for the identity.
///
/// # Example
///
/// ```rust
/// use cg_math::{Mat4, Vec4};
///
/// let m = Mat4::from_scalar(2.0);
/// assert_eq!(m[1], Vec4::new(0.0, 2.0, 0.0, 0.0));
/// assert_eq!(m.determinant(), 16.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(C)]
pub struct Mat4 {
    /// Matrix rows: [row0, row1, row2, row3]
    pub rows: [Vec4; 4],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self::from_scalar(0.0);

    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_scalar(1.0);

    /// Diagonal matrix with `x` on the diagonal.
    #[inline]
    pub const fn from_scalar(x: f32) -> Self {
        Self::from_rows([
            [x, 0.0, 0.0, 0.0],
            [0.0, x, 0.0, 0.0],
            [0.0, 0.0, x, 0.0],
            [0.0, 0.0, 0.0, x],
        ])
    }

    /// Creates a matrix from 16 scalars in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self::from_rows([
            [m00, m01, m02, m03],
            [m10, m11, m12, m13],
            [m20, m21, m22, m23],
            [m30, m31, m32, m33],
        ])
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self {
            rows: [
                Vec4::from_array(rows[0]),
                Vec4::from_array(rows[1]),
                Vec4::from_array(rows[2]),
                Vec4::from_array(rows[3]),
            ],
        }
    }

    /// Creates a matrix from row vectors.
    #[inline]
    pub const fn from_row_vecs(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self { rows: [r0, r1, r2, r3] }
    }

    /// Copies 16 row-major floats out of a slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds fewer than 16 floats.
    #[inline]
    pub fn from_slice(s: &[f32]) -> Self {
        Self {
            rows: std::array::from_fn(|i| Vec4::from_slice(&s[i * 4..])),
        }
    }

    /// Pure rotation matrix from a unit quaternion.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_math::{Mat4, Quat, Vec3};
    ///
    /// let m = Mat4::from_quat(Quat::from_axis_angle(Vec3::Z, 90.0));
    /// assert!(m.transform_vector(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));
    /// ```
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z, w) = (q.v.x(), q.v.y(), q.v.z(), q.r);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        Self::from_rows([
            [1.0 - (yy + zz), xy + wz, xz - wy, 0.0],
            [xy - wz, 1.0 - (xx + zz), yz + wx, 0.0],
            [xz + wy, yz - wx, 1.0 - (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation matrix.
    #[inline]
    pub const fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.rows[3] = v.extend(1.0);
        m
    }

    /// Non-uniform scale matrix.
    #[inline]
    pub const fn from_scale(v: Vec3) -> Self {
        Self::from_rows([
            [v.x(), 0.0, 0.0, 0.0],
            [0.0, v.y(), 0.0, 0.0],
            [0.0, 0.0, v.z(), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        self.rows[i]
    }

    /// Returns column `i`.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::from_array(self.rows.map(|r| r[i]))
    }

    /// Resets to the identity matrix.
    #[inline]
    pub fn load_identity(&mut self) -> &mut Self {
        *self = Self::IDENTITY;
        self
    }

    /// Prepends a translation: `self = from_translation(v) * self`.
    #[inline]
    pub fn translate(&mut self, v: Vec3) -> &mut Self {
        let [r0, r1, r2, _] = self.rows;
        self.rows[3] += v.x() * r0 + v.y() * r1 + v.z() * r2;
        self
    }

    /// Prepends a scale: `self = from_scale(v) * self`.
    #[inline]
    pub fn scale(&mut self, v: Vec3) -> &mut Self {
        self.rows[0] *= v.x();
        self.rows[1] *= v.y();
        self.rows[2] *= v.z();
        self
    }

    /// Prepends a rotation: `self = from_quat(q) * self`.
    #[inline]
    pub fn rotate(&mut self, q: Quat) -> &mut Self {
        *self = Self::from_quat(q) * *self;
        self
    }

    /// Returns the transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.col(i)),
        }
    }

    /// Computes the determinant.
    ///
    /// Cofactor expansion along the first (`x`) column. The four 3x3 minors
    /// are themselves expanded from the six 2x2 minors of the `z`/`w`
    /// columns.
    pub fn determinant(&self) -> f32 {
        let [[x0, y0, z0, w0], [x1, y1, z1, w1], [x2, y2, z2, w2], [x3, y3, z3, w3]] =
            self.rows.map(Vec4::to_array);

        let z1w0 = z1 * w0 - z0 * w1;
        let z2w0 = z2 * w0 - z0 * w2;
        let z2w1 = z2 * w1 - z1 * w2;
        let z3w0 = z3 * w0 - z0 * w3;
        let z3w1 = z3 * w1 - z1 * w3;
        let z3w2 = z3 * w2 - z2 * w3;

        let min00 = y2 * z1w0 - y1 * z2w0 + y0 * z2w1;
        let min01 = y3 * z1w0 - y1 * z3w0 + y0 * z3w1;
        let min02 = y3 * z2w0 - y2 * z3w0 + y0 * z3w2;
        let min03 = y3 * z2w1 - y2 * z3w1 + y1 * z3w2;

        x3 * min00 - x2 * min01 + x1 * min02 - x0 * min03
    }

    /// Computes the inverse via the adjugate.
    ///
    /// A singular matrix divides by zero and yields Inf/NaN entries. Use
    /// [`Mat4::try_inverse`] when the input may be singular.
    pub fn inverse(&self) -> Self {
        let [[x0, y0, z0, w0], [x1, y1, z1, w1], [x2, y2, z2, w2], [x3, y3, z3, w3]] =
            self.rows.map(Vec4::to_array);

        let y1z0 = y1 * z0 - y0 * z1;
        let y2z0 = y2 * z0 - y0 * z2;
        let y2z1 = y2 * z1 - y1 * z2;
        let y3z0 = y3 * z0 - y0 * z3;
        let y3z1 = y3 * z1 - y1 * z3;
        let y3z2 = y3 * z2 - y2 * z3;

        let y1w0 = y1 * w0 - y0 * w1;
        let y2w0 = y2 * w0 - y0 * w2;
        let y2w1 = y2 * w1 - y1 * w2;
        let y3w0 = y3 * w0 - y0 * w3;
        let y3w1 = y3 * w1 - y1 * w3;
        let y3w2 = y3 * w2 - y2 * w3;

        let z1w0 = z1 * w0 - z0 * w1;
        let z2w0 = z2 * w0 - z0 * w2;
        let z2w1 = z2 * w1 - z1 * w2;
        let z3w0 = z3 * w0 - z0 * w3;
        let z3w1 = z3 * w1 - z1 * w3;
        let z3w2 = z3 * w2 - z2 * w3;

        let min00 = y2 * z1w0 - y1 * z2w0 + y0 * z2w1;
        let min01 = y3 * z1w0 - y1 * z3w0 + y0 * z3w1;
        let min02 = y3 * z2w0 - y2 * z3w0 + y0 * z3w2;
        let min03 = y3 * z2w1 - y2 * z3w1 + y1 * z3w2;

        let min10 = x2 * z1w0 - x1 * z2w0 + x0 * z2w1;
        let min11 = x3 * z1w0 - x1 * z3w0 + x0 * z3w1;
        let min12 = x3 * z2w0 - x2 * z3w0 + x0 * z3w2;
        let min13 = x3 * z2w1 - x2 * z3w1 + x1 * z3w2;

        let min20 = x2 * y1w0 - x1 * y2w0 + x0 * y2w1;
        let min21 = x3 * y1w0 - x1 * y3w0 + x0 * y3w1;
        let min22 = x3 * y2w0 - x2 * y3w0 + x0 * y3w2;
        let min23 = x3 * y2w1 - x2 * y3w1 + x1 * y3w2;

        let min30 = x2 * y1z0 - x1 * y2z0 + x0 * y2z1;
        let min31 = x3 * y1z0 - x1 * y3z0 + x0 * y3z1;
        let min32 = x3 * y2z0 - x2 * y3z0 + x0 * y3z2;
        let min33 = x3 * y2z1 - x2 * y3z1 + x1 * y3z2;

        let det = x3 * min00 - x2 * min01 + x1 * min02 - x0 * min03;
        let inv_det = 1.0 / det;

        Self::from_rows([
            [-min03, min02, -min01, min00],
            [min13, -min12, min11, -min10],
            [-min23, min22, -min21, min20],
            [min33, -min32, min31, -min30],
        ]) * inv_det
    }

    /// Computes the inverse, or [`cg_core::Error::SingularMatrix`] when the
    /// determinant is (near) zero or not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_math::Mat4;
    ///
    /// assert!(Mat4::ZERO.try_inverse().is_err());
    /// assert_eq!(Mat4::IDENTITY.try_inverse().unwrap(), Mat4::IDENTITY);
    /// ```
    pub fn try_inverse(&self) -> cg_core::Result<Self> {
        let determinant = self.determinant();
        if determinant.abs() <= f32::EPSILON || !determinant.is_finite() {
            return Err(cg_core::Error::SingularMatrix { determinant });
        }
        Ok(self.inverse())
    }

    /// Transforms a point (`w = 1`), without a perspective divide.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (p.extend(1.0) * *self).truncate()
    }

    /// Transforms a direction (`w = 0`); translation is ignored.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (v.extend(0.0) * *self).truncate()
    }

    /// Transforms a point and divides by the resulting `w`.
    ///
    /// Maps view-space points through a projection matrix into normalized
    /// device coordinates.
    #[inline]
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let h = p.extend(1.0) * *self;
        h.truncate() / h.w()
    }

    /// Extracts the rotation of the upper 3x3 as a quaternion.
    ///
    /// The upper 3x3 must be a pure rotation (no scale or shear).
    pub fn to_quat(&self) -> Quat {
        let m = |i: usize, j: usize| self.rows[i][j];
        let trace = m(0, 0) + m(1, 1) + m(2, 2);

        if trace > 0.0 {
            let w = 0.5 * (1.0 + trace).sqrt();
            let s = 0.25 / w;
            Quat::new(
                w,
                (m(1, 2) - m(2, 1)) * s,
                (m(2, 0) - m(0, 2)) * s,
                (m(0, 1) - m(1, 0)) * s,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let x = 0.5 * (1.0 + m(0, 0) - m(1, 1) - m(2, 2)).sqrt();
            let s = 0.25 / x;
            Quat::new(
                (m(1, 2) - m(2, 1)) * s,
                x,
                (m(1, 0) + m(0, 1)) * s,
                (m(2, 0) + m(0, 2)) * s,
            )
        } else if m(1, 1) > m(2, 2) {
            let y = 0.5 * (1.0 - m(0, 0) + m(1, 1) - m(2, 2)).sqrt();
            let s = 0.25 / y;
            Quat::new(
                (m(2, 0) - m(0, 2)) * s,
                (m(0, 1) + m(1, 0)) * s,
                y,
                (m(1, 2) + m(2, 1)) * s,
            )
        } else {
            let z = 0.5 * (1.0 - m(0, 0) - m(1, 1) + m(2, 2)).sqrt();
            let s = 0.25 / z;
            Quat::new(
                (m(0, 1) - m(1, 0)) * s,
                (m(2, 0) + m(0, 2)) * s,
                (m(1, 2) + m(2, 1)) * s,
                z,
            )
        }
    }

    /// Borrows the 16 contiguous row-major floats.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(self)
    }

    /// Returns the 16 row-major floats.
    #[inline]
    pub fn to_array(&self) -> [f32; 16] {
        *self.as_array()
    }

    /// Flattens a slice of matrices for uniform array uploads.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_math::Mat4;
    ///
    /// let bones = [Mat4::IDENTITY, Mat4::ZERO];
    /// assert_eq!(Mat4::as_float_slice(&bones).len(), 32);
    /// ```
    #[inline]
    pub fn as_float_slice(mats: &[Mat4]) -> &[f32] {
        bytemuck::cast_slice(mats)
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.rows.iter().all(|r| r.is_finite())
    }

    /// Element-wise comparison within an absolute tolerance.
    #[inline]
    pub fn abs_diff_eq(&self, other: &Self, eps: f32) -> bool {
        self.rows
            .iter()
            .zip(other.rows.iter())
            .all(|(a, b)| a.abs_diff_eq(*b, eps))
    }

    /// Converts to glam Mat4.
    ///
    /// The memory is reused as-is: glam's column `i` is our row `i`, so
    /// `to_glam(a * b) == to_glam(b) * to_glam(a)`.
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(self.as_array())
    }

    /// Creates from glam Mat4.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_slice(&m.to_cols_array())
    }
}

impl Index<usize> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn index(&self, i: usize) -> &Vec4 {
        &self.rows[i]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Vec4 {
        &mut self.rows[i]
    }
}

// Row vector times matrix
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, m: Mat4) -> Vec4 {
        let [r0, r1, r2, r3] = m.rows;
        self.x() * r0 + self.y() * r1 + self.z() * r2 + self.w() * r3
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            rows: self.rows.map(|r| r * rhs),
        }
    }
}

impl MulAssign for Mat4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            rows: self.rows.map(|r| r * rhs),
        }
    }
}

impl Mul<Mat4> for f32 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        rhs * self
    }
}

impl Add for Mat4 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.rows[i] + rhs.rows[i]),
        }
    }
}

impl Sub for Mat4 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            rows: std::array::from_fn(|i| self.rows[i] - rhs.rows[i]),
        }
    }
}

impl Neg for Mat4 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            rows: self.rows.map(|r| -r),
        }
    }
}

impl From<glam::Mat4> for Mat4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat4> for glam::Mat4 {
    #[inline]
    fn from(m: Mat4) -> glam::Mat4 {
        m.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_trs() -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(3.0, -1.0, 7.5))
            .rotate(Quat::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 37.0))
            .scale(Vec3::new(2.0, 0.5, 1.5));
        m
    }

    #[test]
    fn test_mat4_identity() {
        assert_eq!(Mat4::IDENTITY, Mat4::from_scalar(1.0));
        assert_eq!(Mat4::default(), Mat4::ZERO);

        let mut m = sample_trs();
        m.load_identity();
        assert_eq!(m, Mat4::IDENTITY);
    }

    #[test]
    fn test_mat4_identity_determinant_exact() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
        assert_eq!(Mat4::ZERO.determinant(), 0.0);
    }

    #[test]
    fn test_mat4_constructors_agree() {
        let flat: [f32; 16] = std::array::from_fn(|i| i as f32);
        let a = Mat4::from_slice(&flat);
        let b = Mat4::new(
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
        );
        let c = Mat4::from_row_vecs(
            Vec4::new(0.0, 1.0, 2.0, 3.0),
            Vec4::new(4.0, 5.0, 6.0, 7.0),
            Vec4::new(8.0, 9.0, 10.0, 11.0),
            Vec4::new(12.0, 13.0, 14.0, 15.0),
        );
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.as_array(), &flat);
        assert_eq!(a[2][1], 9.0);
        assert_eq!(a.col(1), Vec4::new(1.0, 5.0, 9.0, 13.0));
    }

    #[test]
    #[should_panic]
    fn test_mat4_from_short_slice() {
        let _ = Mat4::from_slice(&[0.0; 15]);
    }

    #[test]
    fn test_mat4_translate_row3() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m[3], Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_vector(Vec3::X), Vec3::X);
    }

    #[test]
    fn test_mat4_scale() {
        let mut m = Mat4::IDENTITY;
        m.scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m, Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0)));
        assert_eq!(m.transform_point(Vec3::ONE), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(m.determinant(), 24.0);
    }

    #[test]
    fn test_mat4_mutators_prepend() {
        let t = Vec3::new(1.0, -2.0, 0.5);
        let s = Vec3::new(2.0, 2.0, 3.0);
        let q = Quat::from_axis_angle(Vec3::Z, 30.0);
        let base = sample_trs();

        let mut m = base;
        m.translate(t);
        assert!(m.abs_diff_eq(&(Mat4::from_translation(t) * base), 1e-5));

        let mut m = base;
        m.scale(s);
        assert!(m.abs_diff_eq(&(Mat4::from_scale(s) * base), 1e-5));

        let mut m = base;
        m.rotate(q);
        assert!(m.abs_diff_eq(&(Mat4::from_quat(q) * base), 1e-5));
    }

    #[test]
    fn test_mat4_trs_order() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(10.0, 0.0, 0.0))
            .rotate(Quat::from_axis_angle(Vec3::Y, 90.0))
            .scale(Vec3::splat(2.0));
        let p = m.transform_point(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(10.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn test_mat4_from_quat_rotates_like_quat() {
        let q = Quat::from_axis_angle(Vec3::Y, 90.0);
        let m = Mat4::from_quat(q);
        assert!(m.transform_vector(Vec3::X).abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));

        let q = Quat::from_axis_angle(Vec3::new(0.3, -1.0, 0.2), 123.0);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(Mat4::from_quat(q).transform_vector(v).abs_diff_eq(q * v, 1e-5));
        assert_eq!(Mat4::from_quat(q)[3], Vec4::W);
        assert_eq!(Mat4::from_quat(q).col(3), Vec4::W);
    }

    #[test]
    fn test_mat4_multiply_associates_with_points() {
        let a = sample_trs();
        let b = Mat4::from_quat(Quat::from_axis_angle(Vec3::X, 45.0));
        let p = Vec3::new(0.5, 1.0, -2.0);
        let combined = (a * b).transform_point(p);
        let sequential = b.transform_point(a.transform_point(p));
        assert!(combined.abs_diff_eq(sequential, 1e-4));

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn test_mat4_inverse_trs() {
        let m = sample_trs();
        let inv = m.inverse();
        assert!((m * inv).abs_diff_eq(&Mat4::IDENTITY, 1e-5));
        assert!((inv * m).abs_diff_eq(&Mat4::IDENTITY, 1e-5));
        assert!(m.try_inverse().is_ok());
    }

    #[test]
    fn test_mat4_inverse_general() {
        let m = Mat4::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 0.0, 1.0],
            [1.0, 0.0, 6.0, 2.0],
            [3.0, 1.0, 0.0, 8.0],
        ]);
        let g = m.to_glam();
        assert_relative_eq!(m.determinant(), g.determinant(), epsilon = 1e-2);
        let ours = m.inverse();
        let theirs = Mat4::from_glam(g.inverse());
        assert!(ours.abs_diff_eq(&theirs, 1e-5));
    }

    #[test]
    fn test_mat4_singular() {
        let m = Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 4.0, 6.0, 8.0],
            [0.0, 1.0, 0.0, 1.0],
            [5.0, 0.0, 1.0, 0.0],
        ]);
        assert_eq!(m.determinant(), 0.0);
        assert!(!m.inverse().is_finite());
        match m.try_inverse() {
            Err(cg_core::Error::SingularMatrix { determinant }) => assert_eq!(determinant, 0.0),
            other => panic!("expected singular matrix, got {other:?}"),
        }
    }

    #[test]
    fn test_mat4_transpose() {
        let m = sample_trs();
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose()[0], m.col(0));
        assert_relative_eq!(m.transpose().determinant(), m.determinant(), epsilon = 1e-4);
    }

    #[test]
    fn test_mat4_arithmetic() {
        let a = sample_trs();
        assert_eq!(a + Mat4::ZERO, a);
        assert_eq!(a - a, Mat4::ZERO);
        assert_eq!(-a + a, Mat4::ZERO);
        assert_eq!(2.0 * a, a + a);
        assert_eq!(a * Mat4::IDENTITY, a);
        assert_eq!(Mat4::IDENTITY * a, a);
    }

    #[test]
    fn test_mat4_vec4_mul() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 1.0) * m, Vec4::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(Vec4::new(1.0, 1.0, 1.0, 0.0) * m, Vec4::new(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_mat4_to_quat_roundtrip() {
        let axes_angles = [
            (Vec3::Y, 90.0),
            (Vec3::X, 179.0),
            (Vec3::Y, 200.0),
            (Vec3::Z, -170.0),
            (Vec3::new(1.0, 1.0, 1.0), 45.0),
            (Vec3::new(-0.2, 0.7, 0.1), 300.0),
        ];
        for (axis, angle) in axes_angles {
            let q = Quat::from_axis_angle(axis, angle);
            let back = Mat4::from_quat(q).to_quat();
            // q and -q are the same rotation
            assert_relative_eq!(back.dot(q).abs(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_mat4_glam_layout() {
        let a = sample_trs();
        let b = Mat4::from_quat(Quat::from_axis_angle(Vec3::Z, 20.0));
        let ours = Mat4::from_glam(b.to_glam() * a.to_glam());
        assert!((a * b).abs_diff_eq(&ours, 1e-5));

        let q = Quat::from_axis_angle(Vec3::new(2.0, -1.0, 0.0), 77.0);
        let g = glam::Mat4::from_quat(q.to_glam());
        assert!(Mat4::from_quat(q).abs_diff_eq(&Mat4::from_glam(g), 1e-6));

        let t = glam::Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Mat4::from(t), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_mat4_float_slice() {
        let mats = [Mat4::IDENTITY, Mat4::from_scalar(2.0)];
        let flat = Mat4::as_float_slice(&mats);
        assert_eq!(flat.len(), 32);
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[16], 2.0);
        assert_eq!(flat[21], 2.0);
    }
}

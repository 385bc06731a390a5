//! SIMD-accelerated batch transforms.
//!
//! Vertex buffers are transformed with the `wide` crate's portable
//! `f32x4`: a [`Mat4`] row fits one register, so a row-vector product is
//! three fused multiply-adds over the rows. Large buffers can be split
//! across a rayon thread pool with [`par_transform_points`].
//!
//! # Example
//!
//! ```rust
//! use cg_math::simd::transform_points;
//! use cg_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
//! let moved = transform_points(&m, &[Vec3::ZERO, Vec3::X]);
//! assert_eq!(moved, vec![Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]);
//! ```

use rayon::prelude::*;
use wide::f32x4;

use crate::{Mat4, Vec3};

/// Points per rayon task in [`par_transform_points`].
const PAR_CHUNK: usize = 4096;

#[inline]
fn rows_x4(m: &Mat4) -> [f32x4; 4] {
    m.rows.map(|r| f32x4::from(r.to_array()))
}

#[inline]
fn mul_row_x4(rows: &[f32x4; 4], v: Vec3, w: f32x4) -> Vec3 {
    let r = rows[0] * f32x4::splat(v.x())
        + rows[1] * f32x4::splat(v.y())
        + rows[2] * f32x4::splat(v.z())
        + w;
    let [x, y, z, _] = r.to_array();
    Vec3::new(x, y, z)
}

/// Dot product of two 4-element arrays.
///
/// # Example
///
/// ```rust
/// use cg_math::simd::dot_x4;
///
/// assert_eq!(dot_x4(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 1.0, 1.0]), 10.0);
/// ```
#[inline]
pub fn dot_x4(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    (f32x4::from(*a) * f32x4::from(*b)).reduce_add()
}

/// Linear interpolation between two 4-element arrays.
#[inline]
pub fn lerp_x4(a: &[f32; 4], b: &[f32; 4], t: f32) -> [f32; 4] {
    let va = f32x4::from(*a);
    let vb = f32x4::from(*b);
    let vt = f32x4::splat(t);
    (va + (vb - va) * vt).to_array()
}

/// Transforms points (`w = 1`) by `m`, no perspective divide.
///
/// Same result as calling [`Mat4::transform_point`] per element.
pub fn transform_points(m: &Mat4, points: &[Vec3]) -> Vec<Vec3> {
    let rows = rows_x4(m);
    points.iter().map(|&p| mul_row_x4(&rows, p, rows[3])).collect()
}

/// Transforms directions (`w = 0`) by `m`; translation is ignored.
pub fn transform_vectors(m: &Mat4, vectors: &[Vec3]) -> Vec<Vec3> {
    let rows = rows_x4(m);
    let zero = f32x4::splat(0.0);
    vectors.iter().map(|&v| mul_row_x4(&rows, v, zero)).collect()
}

/// Transforms points in place.
pub fn transform_points_inplace(m: &Mat4, points: &mut [Vec3]) {
    let rows = rows_x4(m);
    for p in points.iter_mut() {
        *p = mul_row_x4(&rows, *p, rows[3]);
    }
}

/// Parallel [`transform_points`] for large buffers.
///
/// Output order matches input order.
///
/// # Example
///
/// ```rust
/// use cg_math::simd::par_transform_points;
/// use cg_math::{Mat4, Vec3};
///
/// let points = vec![Vec3::ONE; 10_000];
/// let scaled = par_transform_points(&Mat4::from_scalar(2.0), &points);
/// assert!(scaled.iter().all(|&p| p == Vec3::splat(2.0)));
/// ```
pub fn par_transform_points(m: &Mat4, points: &[Vec3]) -> Vec<Vec3> {
    let rows = rows_x4(m);
    points
        .par_chunks(PAR_CHUNK)
        .flat_map_iter(|chunk| chunk.iter().map(move |&p| mul_row_x4(&rows, p, rows[3])))
        .collect()
}

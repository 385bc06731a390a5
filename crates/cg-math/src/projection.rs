//! Projection and view matrix builders.
//!
//! All builders produce OpenGL-style matrices in the row-vector layout of
//! [`Mat4`]: right-handed view space looking down `-Z`, clip-space depth
//! in `[-1, 1]`.
//!
//! # Usage
//!
//! ```rust
//! use cg_math::projection::{look_at, perspective};
//! use cg_math::Vec3;
//!
//! let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
//! let proj = perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
//! let view_proj = view * proj;
//!
//! let ndc = view_proj.project_point(Vec3::ZERO);
//! assert!(ndc.x().abs() < 1e-6 && ndc.y().abs() < 1e-6);
//! ```

use cg_core::{Error, Result};

use crate::{Mat4, Vec3};

/// Perspective projection.
///
/// `fov_y` is the full vertical field of view in degrees. With
/// `F = 1 / tan(fov_y / 2)`:
///
/// ```text
/// | F/aspect  0   0                  0  |
/// | 0         F   0                  0  |
/// | 0         0   (far+near)/(near-far) -1 |
/// | 0         0   2*far*near/(near-far)  0 |
/// ```
///
/// Degenerate parameters (zero aspect, `near == far`) give Inf/NaN; see
/// [`try_perspective`].
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (cg_core::to_radians(fov_y) * 0.5).tan();
    let range = near - far;

    Mat4::from_rows([
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, (far + near) / range, -1.0],
        [0.0, 0.0, 2.0 * far * near / range, 0.0],
    ])
}

/// Orthographic projection mapping the given box to the clip cube.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    Mat4::from_rows([
        [2.0 / width, 0.0, 0.0, 0.0],
        [0.0, 2.0 / height, 0.0, 0.0],
        [0.0, 0.0, -2.0 / depth, 0.0],
        [
            -(right + left) / width,
            -(top + bottom) / height,
            -(far + near) / depth,
            1.0,
        ],
    ])
}

/// View matrix for a camera at `eye` looking at `center`.
///
/// Builds the orthonormal basis `F = normalize(center - eye)`,
/// `S = normalize(F x up)`, `U = S x F`. The camera looks down `-Z` in view
/// space with `U` as its up direction, and `eye` maps to the origin.
///
/// # Example
///
/// ```rust
/// use cg_math::projection::look_at;
/// use cg_math::{Vec3, Vec4};
///
/// let eye = Vec3::new(0.0, 0.0, 5.0);
/// let view = look_at(eye, Vec3::ZERO, Vec3::Y);
/// assert_eq!(view[3], Vec4::new(0.0, 0.0, -5.0, 1.0));
/// assert_eq!(view.transform_point(eye), Vec3::ZERO);
/// ```
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let f = (center - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    Mat4::from_rows([
        [s.x(), u.x(), -f.x(), 0.0],
        [s.y(), u.y(), -f.y(), 0.0],
        [s.z(), u.z(), -f.z(), 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ])
}

/// [`perspective`] with parameter validation.
///
/// Requires `0 < fov_y < 180`, `aspect > 0`, and positive, distinct, finite
/// `near` and `far`. `near > far` is accepted and still maps `near` to NDC
/// depth -1.
pub fn try_perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Mat4> {
    if !(fov_y > 0.0 && fov_y < 180.0) {
        return Err(Error::invalid_projection(format!(
            "field of view {fov_y} is outside (0, 180) degrees"
        )));
    }
    if !(aspect > 0.0 && aspect.is_finite()) {
        return Err(Error::invalid_projection(format!(
            "aspect ratio {aspect} must be positive"
        )));
    }
    if !(near > 0.0 && far > 0.0 && near != far && near.is_finite() && far.is_finite()) {
        return Err(Error::invalid_projection(format!(
            "depth range near={near} far={far} must be positive and distinct"
        )));
    }
    Ok(perspective(fov_y, aspect, near, far))
}

/// [`orthographic`] with parameter validation.
///
/// Each axis needs a non-empty, finite extent.
pub fn try_orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Result<Mat4> {
    let axes = [("left/right", left, right), ("bottom/top", bottom, top), ("near/far", near, far)];
    for (name, lo, hi) in axes {
        let extent = hi - lo;
        if extent.abs() <= f32::EPSILON || !extent.is_finite() {
            return Err(Error::invalid_projection(format!(
                "{name} bounds {lo} and {hi} span no volume"
            )));
        }
    }
    Ok(orthographic(left, right, bottom, top, near, far))
}

/// [`look_at`] with basis validation.
///
/// Fails when `eye == center` or when `up` is parallel to the view
/// direction.
pub fn try_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Result<Mat4> {
    let f = (center - eye)
        .try_normalized()
        .map_err(|_| Error::degenerate_basis("eye and center coincide"))?;
    f.cross(up)
        .try_normalized()
        .map_err(|_| Error::degenerate_basis("up vector is parallel to the view direction"))?;
    Ok(look_at(eye, center, up))
}

/// A camera projection, kept as parameters so it can be rebuilt when the
/// viewport changes.
///
/// # Example
///
/// ```rust
/// use cg_math::projection::{perspective, Projection};
///
/// let proj = Projection::default().with_aspect(2.0);
/// assert_eq!(proj.matrix(), perspective(45.0, 2.0, 0.1, 100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Projection {
    /// Pinhole camera, see [`perspective`].
    Perspective {
        /// Vertical field of view in degrees
        fov_y: f32,
        /// Width over height
        aspect: f32,
        /// Near clip distance
        near: f32,
        /// Far clip distance
        far: f32,
    },
    /// Parallel projection, see [`orthographic`].
    Orthographic {
        /// Left plane
        left: f32,
        /// Right plane
        right: f32,
        /// Bottom plane
        bottom: f32,
        /// Top plane
        top: f32,
        /// Near plane
        near: f32,
        /// Far plane
        far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective {
            fov_y: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// Builds the projection matrix.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective { fov_y, aspect, near, far } => perspective(fov_y, aspect, near, far),
            Self::Orthographic { left, right, bottom, top, near, far } => {
                orthographic(left, right, bottom, top, near, far)
            }
        }
    }

    /// Builds the projection matrix, validating the parameters first.
    pub fn try_matrix(&self) -> Result<Mat4> {
        match *self {
            Self::Perspective { fov_y, aspect, near, far } => {
                try_perspective(fov_y, aspect, near, far)
            }
            Self::Orthographic { left, right, bottom, top, near, far } => {
                try_orthographic(left, right, bottom, top, near, far)
            }
        }
    }

    /// Adapts the projection to a new viewport aspect ratio.
    ///
    /// Orthographic volumes keep their vertical extent and horizontal
    /// center and widen or narrow horizontally.
    pub fn with_aspect(self, aspect: f32) -> Self {
        match self {
            Self::Perspective { fov_y, near, far, .. } => Self::Perspective { fov_y, aspect, near, far },
            Self::Orthographic { left, right, bottom, top, near, far } => {
                let center = 0.5 * (left + right);
                let half_width = 0.5 * (top - bottom) * aspect;
                Self::Orthographic {
                    left: center - half_width,
                    right: center + half_width,
                    bottom,
                    top,
                    near,
                    far,
                }
            }
        }
    }
}

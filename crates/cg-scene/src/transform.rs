//! Translate/rotate/scale model transforms.

use cg_math::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, Euler rotation and scale of a model.
///
/// [`Transform::matrix`] applies scale first, then rotation about Z, Y and
/// X, then translation.
///
/// # Example
///
/// ```rust
/// use cg_scene::Transform;
/// use cg_math::Vec3;
///
/// let t = Transform {
///     position: Vec3::new(0.0, 1.0, 0.0),
///     scale: Vec3::splat(2.0),
///     ..Transform::default()
/// };
/// assert_eq!(t.matrix().transform_point(Vec3::X), Vec3::new(2.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World position.
    pub position: Vec3,
    /// Rotation about X, Y and Z in degrees.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Pure translation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Combined rotation as a quaternion.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_axis_angle(Vec3::X, self.rotation.x())
            * Quat::from_axis_angle(Vec3::Y, self.rotation.y())
            * Quat::from_axis_angle(Vec3::Z, self.rotation.z())
    }

    /// Model matrix.
    pub fn matrix(&self) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.translate(self.position)
            .rotate(Quat::from_axis_angle(Vec3::X, self.rotation.x()))
            .rotate(Quat::from_axis_angle(Vec3::Y, self.rotation.y()))
            .rotate(Quat::from_axis_angle(Vec3::Z, self.rotation.z()))
            .scale(self.scale);
        m
    }

    /// Matrix for transforming normals: inverse transpose of the model
    /// matrix. Undefined (Inf/NaN) for a zero scale.
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }

    /// [`Transform::normal_matrix`], failing on a singular model matrix.
    pub fn try_normal_matrix(&self) -> cg_core::Result<Mat4> {
        Ok(self.matrix().try_inverse()?.transpose())
    }
}

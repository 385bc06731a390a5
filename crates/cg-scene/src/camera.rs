//! Interactive cameras producing view and projection matrices.
//!
//! Two camera models are provided:
//!
//! - [`FlyCamera`] - first-person camera steered by yaw/pitch in degrees,
//!   optionally confined to a room at a fixed eye height and pulled down
//!   by gravity
//! - [`OrbitCamera`] - circles a target point at a given radius, yaw/pitch
//!   in radians
//!
//! Both implement [`Camera`], which is what a render loop consumes each
//! frame.
//!
//! # Usage
//!
//! ```rust
//! use cg_scene::camera::{Camera, Direction, FlyCamera};
//! use cg_math::Vec3;
//!
//! let mut cam = FlyCamera::new(Vec3::new(0.0, 2.0, 5.0));
//! cam.move_dir(Direction::Forward, 0.5);
//! cam.rotate(10.0, 0.0, 0.016);
//!
//! let view_proj = cam.view() * cam.projection(16.0 / 9.0);
//! ```

use cg_core::{to_radians, PI_HALF};
use cg_math::projection::{look_at, Projection};
use cg_math::{clamp, wrap_radians, Mat4, Vec3};
use tracing::trace;

use crate::geometry::Aabb;

/// Gravitational acceleration in units per second squared.
pub const GRAVITY: f32 = 9.81;

/// Fly camera pitch limit in degrees.
pub const FLY_PITCH_LIMIT: f32 = 89.0;

/// Orbit camera pitch limit in radians, just short of the poles.
pub const ORBIT_PITCH_LIMIT: f32 = PI_HALF - 1e-4;

/// Smallest orbit radius [`OrbitCamera::zoom`] allows.
pub const MIN_ORBIT_RADIUS: f32 = 0.5;

/// Something that can be rendered from.
pub trait Camera {
    /// Eye position in world space.
    fn position(&self) -> Vec3;

    /// World-to-view matrix.
    fn view(&self) -> Mat4;

    /// Lens parameters of this camera.
    fn lens(&self) -> Projection;

    /// Projection matrix for a viewport with the given aspect ratio.
    fn projection(&self, aspect: f32) -> Mat4 {
        self.lens().with_aspect(aspect).matrix()
    }

    /// `view * projection`, the matrix that takes world points to clip space.
    fn view_projection(&self, aspect: f32) -> Mat4 {
        self.view() * self.projection(aspect)
    }
}

/// Width over height, with a zero height treated as one pixel.
#[inline]
pub fn viewport_aspect(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Movement direction for [`FlyCamera::move_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along the front vector.
    Forward,
    /// Against the front vector.
    Backward,
    /// Against the right vector.
    Left,
    /// Along the right vector.
    Right,
}

/// First-person camera.
///
/// Yaw starts at -90 degrees so the camera initially looks down `-Z`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    /// Eye position.
    pub position: Vec3,
    /// Current velocity, only integrated by [`FlyCamera::apply_gravity`].
    pub velocity: Vec3,
    /// Heading in degrees, 0 looks down `+X`.
    pub yaw: f32,
    /// Elevation in degrees, kept within +/-89.
    pub pitch: f32,
    /// World up direction.
    pub world_up: Vec3,
    /// Units per second.
    pub move_speed: f32,
    /// Degrees per second per unit of input.
    pub look_speed: f32,
    /// Region the eye is confined to.
    pub bounds: Option<Aabb>,
    /// Lens parameters.
    pub lens: Projection,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FlyCamera {
    /// Default movement speed.
    pub const DEFAULT_MOVE_SPEED: f32 = 8.0;

    /// Default look speed.
    pub const DEFAULT_LOOK_SPEED: f32 = 50.0;

    /// Free-flying camera at `position`, looking down `-Z`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: -90.0,
            pitch: 0.0,
            world_up: Vec3::Y,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            look_speed: Self::DEFAULT_LOOK_SPEED,
            bounds: None,
            lens: Projection::default(),
        }
    }

    /// Confines the eye to a square room of the given half extent, walking
    /// at a fixed `eye_height`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cg_scene::camera::FlyCamera;
    /// use cg_math::Vec3;
    ///
    /// let cam = FlyCamera::new(Vec3::new(40.0, 0.0, 0.0)).with_room(15.0, 2.0);
    /// assert_eq!(cam.position, Vec3::new(15.0, 2.0, 0.0));
    /// ```
    pub fn with_room(self, half_extent: f32, eye_height: f32) -> Self {
        self.with_bounds(Aabb::new(
            Vec3::new(-half_extent, eye_height, -half_extent),
            Vec3::new(half_extent, eye_height, half_extent),
        ))
    }

    /// Confines the eye to `bounds`.
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = Some(bounds);
        self.confine();
        self
    }

    /// Replaces the lens.
    pub fn with_lens(mut self, lens: Projection) -> Self {
        self.lens = lens;
        self
    }

    /// Sets yaw and pitch in degrees, clamping pitch like
    /// [`FlyCamera::rotate`].
    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = clamp(pitch, -FLY_PITCH_LIMIT, FLY_PITCH_LIMIT);
        self
    }

    /// Unit view direction derived from yaw and pitch.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (to_radians(self.yaw), to_radians(self.pitch));
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalized()
    }

    /// Unit right vector, `front x world_up`.
    pub fn right(&self) -> Vec3 {
        self.front().cross(self.world_up).normalized()
    }

    /// Unit camera up vector, `right x front`.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalized()
    }

    /// Moves `move_speed * dt` units in `dir`.
    pub fn move_dir(&mut self, dir: Direction, dt: f32) {
        let step = self.move_speed * dt;
        let offset = match dir {
            Direction::Forward => step * self.front(),
            Direction::Backward => -step * self.front(),
            Direction::Right => step * self.right(),
            Direction::Left => -step * self.right(),
        };
        self.position += offset;
        self.confine();
    }

    /// Turns by mouse deltas `dx` (yaw) and `dy` (pitch), scaled by
    /// `look_speed * dt`. Pitch is clamped to +/-89 degrees.
    pub fn rotate(&mut self, dx: f32, dy: f32, dt: f32) {
        let step = self.look_speed * dt;
        self.yaw += dx * step;
        self.pitch = clamp(self.pitch + dy * step, -FLY_PITCH_LIMIT, FLY_PITCH_LIMIT);
    }

    /// Integrates one step of free fall.
    ///
    /// Hitting the floor of [`FlyCamera::bounds`] stops the fall.
    pub fn apply_gravity(&mut self, dt: f32) {
        *self.velocity.y_mut() -= GRAVITY * dt;
        self.position += self.velocity * dt;
        self.confine();
    }

    fn confine(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let clamped = self.position.clamp(bounds.min, bounds.max);
        if clamped != self.position {
            trace!(from = ?self.position, to = ?clamped, "fly camera clamped to bounds");
            if clamped.y() != self.position.y() {
                *self.velocity.y_mut() = 0.0;
            }
            self.position = clamped;
        }
    }
}

impl Camera for FlyCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn view(&self) -> Mat4 {
        look_at(self.position, self.position + self.front(), self.up())
    }

    fn lens(&self) -> Projection {
        self.lens
    }
}

/// Camera orbiting a target on a sphere.
///
/// Yaw is measured from `+X` towards `+Z` and starts at `pi/2`, which puts
/// the eye on the `+Z` side of the target.
///
/// # Example
///
/// ```rust
/// use cg_scene::camera::{Camera, OrbitCamera};
/// use cg_math::Vec3;
///
/// let cam = OrbitCamera::new(Vec3::ZERO, 5.0);
/// assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from the target.
    pub radius: f32,
    /// Heading in radians, kept in `[0, 2pi)`.
    pub yaw: f32,
    /// Elevation in radians, kept just inside +/-pi/2.
    pub pitch: f32,
    /// Radians per second per unit of input.
    pub rotate_speed: f32,
    /// Radius units per second per unit of input.
    pub zoom_speed: f32,
    /// World up direction.
    pub world_up: Vec3,
    /// Lens parameters.
    pub lens: Projection,
}

impl OrbitCamera {
    /// Default rotate speed.
    pub const DEFAULT_ROTATE_SPEED: f32 = 10.0;

    /// Default zoom speed.
    pub const DEFAULT_ZOOM_SPEED: f32 = 10.0;

    /// Orbit of `radius` around `target`.
    pub fn new(target: Vec3, radius: f32) -> Self {
        Self {
            target,
            radius,
            yaw: PI_HALF,
            pitch: 0.0,
            rotate_speed: Self::DEFAULT_ROTATE_SPEED,
            zoom_speed: Self::DEFAULT_ZOOM_SPEED,
            world_up: Vec3::Y,
            lens: Projection::default(),
        }
    }

    /// Replaces the lens.
    pub fn with_lens(mut self, lens: Projection) -> Self {
        self.lens = lens;
        self
    }

    /// Sets yaw and pitch, applying the same wrapping and clamping as
    /// [`OrbitCamera::rotate`].
    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = wrap_radians(yaw);
        self.pitch = clamp(pitch, -ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        self
    }

    /// Orbits by `d_yaw`/`d_pitch` scaled by `rotate_speed * dt`.
    ///
    /// Positive deltas decrease the angles.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32, dt: f32) {
        let step = self.rotate_speed * dt;
        self.yaw = wrap_radians(self.yaw - d_yaw * step);
        let pitch = self.pitch - d_pitch * step;
        self.pitch = clamp(pitch, -ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
        if pitch != self.pitch {
            trace!(pitch, clamped = self.pitch, "orbit pitch clamped");
        }
    }

    /// Moves towards (`dy > 0`) or away from the target, never closer than
    /// [`MIN_ORBIT_RADIUS`].
    pub fn zoom(&mut self, dy: f32, dt: f32) {
        self.radius -= dy * self.zoom_speed * dt;
        if self.radius <= MIN_ORBIT_RADIUS {
            trace!(radius = self.radius, "orbit radius clamped");
            self.radius = MIN_ORBIT_RADIUS;
        }
    }

    /// Unit direction from the eye to the target.
    pub fn front(&self) -> Vec3 {
        (self.target - self.position()).normalized()
    }

    /// Unit right vector, `front x world_up`.
    pub fn right(&self) -> Vec3 {
        self.front().cross(self.world_up).normalized()
    }

    /// Unit camera up vector, `right x front`.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalized()
    }
}

impl Camera for OrbitCamera {
    fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + self.radius * Vec3::new(cos_yaw * cos_pitch, sin_pitch, cos_pitch * sin_yaw)
    }

    fn view(&self) -> Mat4 {
        look_at(self.position(), self.target, self.up())
    }

    fn lens(&self) -> Projection {
        self.lens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cg_math::projection::perspective;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_fly_initial_basis() {
        let cam = FlyCamera::default();
        assert!(cam.front().abs_diff_eq(-Vec3::Z, 1e-6));
        assert!(cam.right().abs_diff_eq(Vec3::X, 1e-6));
        assert!(cam.up().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_fly_move() {
        let mut cam = FlyCamera::default();
        cam.move_dir(Direction::Forward, 0.5);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-5));
        cam.move_dir(Direction::Right, 0.25);
        assert!(cam.position.abs_diff_eq(Vec3::new(2.0, 0.0, -4.0), 1e-5));
        cam.move_dir(Direction::Backward, 0.5);
        cam.move_dir(Direction::Left, 0.25);
        assert!(cam.position.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_fly_pitch_clamp() {
        let mut cam = FlyCamera::default();
        cam.rotate(0.0, 100.0, 1.0);
        assert_eq!(cam.pitch, FLY_PITCH_LIMIT);
        cam.rotate(0.0, -1000.0, 1.0);
        assert_eq!(cam.pitch, -FLY_PITCH_LIMIT);
        assert!(cam.front().is_finite());
        assert!(cam.view().is_finite());
    }

    #[test]
    fn test_fly_yaw_turns_right() {
        let mut cam = FlyCamera::default();
        // 90 degrees of yaw: look speed 50 * dt 0.9 * dx 2
        cam.rotate(2.0, 0.0, 0.9);
        assert_relative_eq!(cam.yaw, 0.0, epsilon = 1e-4);
        assert!(cam.front().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_fly_room_bounds() {
        let mut cam = FlyCamera::new(Vec3::ZERO).with_room(15.0, 2.0);
        assert_eq!(cam.position, Vec3::new(0.0, 2.0, 0.0));
        for _ in 0..100 {
            cam.move_dir(Direction::Forward, 0.1);
        }
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 2.0, -15.0), 1e-4));
        assert_eq!(cam.position.z(), -15.0);
    }

    #[test]
    fn test_fly_gravity() {
        let mut free = FlyCamera::new(Vec3::new(0.0, 10.0, 0.0));
        free.apply_gravity(1.0);
        assert_relative_eq!(free.velocity.y(), -GRAVITY);
        assert_relative_eq!(free.position.y(), 10.0 - GRAVITY);

        let mut walker = FlyCamera::new(Vec3::ZERO).with_room(15.0, 2.0);
        walker.apply_gravity(0.5);
        assert_eq!(walker.position.y(), 2.0);
        assert_eq!(walker.velocity.y(), 0.0);
    }

    #[test]
    fn test_fly_view_moves_eye_to_origin() {
        let mut cam = FlyCamera::new(Vec3::new(1.0, 2.0, 3.0));
        cam.rotate(0.4, -0.2, 1.0);
        let eye = cam.view().transform_point(cam.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_fly_projection() {
        let cam = FlyCamera::default();
        let aspect = viewport_aspect(1280, 720);
        assert_eq!(cam.projection(aspect), perspective(45.0, aspect, 0.1, 100.0));
        assert_eq!(viewport_aspect(800, 0), 800.0);
    }

    #[test]
    fn test_orbit_initial_position() {
        let cam = OrbitCamera::new(Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(1.0, 0.0, 5.0), 1e-5));
        assert!(cam.front().abs_diff_eq(-Vec3::Z, 1e-5));
    }

    #[test]
    fn test_orbit_yaw_wraps() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 3.0);
        cam.rotate(0.2, 0.0, 1.0);
        // pi/2 - 2 wraps into [0, 2pi)
        assert_relative_eq!(cam.yaw, PI_HALF - 2.0 + TAU, epsilon = 1e-5);
        cam.rotate(-1.0, 0.0, 1.0);
        assert!(cam.yaw >= 0.0 && cam.yaw < TAU);
    }

    #[test]
    fn test_orbit_pitch_clamp() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 3.0);
        cam.rotate(0.0, -10.0, 1.0);
        assert_eq!(cam.pitch, ORBIT_PITCH_LIMIT);
        assert!(cam.view().is_finite());
        cam.rotate(0.0, 10.0, 10.0);
        assert_eq!(cam.pitch, -ORBIT_PITCH_LIMIT);
        assert!(cam.pitch > -PI / 2.0);
    }

    #[test]
    fn test_orbit_zoom_floor() {
        let mut cam = OrbitCamera::new(Vec3::ZERO, 3.0);
        cam.zoom(0.1, 1.0);
        assert_relative_eq!(cam.radius, 2.0);
        cam.zoom(10.0, 1.0);
        assert_eq!(cam.radius, MIN_ORBIT_RADIUS);
        cam.zoom(-1.0, 0.1);
        assert_relative_eq!(cam.radius, MIN_ORBIT_RADIUS + 1.0);
    }

    #[test]
    fn test_orbit_view_looks_at_target() {
        let cam = OrbitCamera::new(Vec3::new(2.0, 1.0, -1.0), 4.0).with_angles(0.7, 0.3);
        let target = cam.view().transform_point(cam.target);
        assert!(target.abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-4));
        assert_relative_eq!((cam.position() - cam.target).magnitude(), 4.0, epsilon = 1e-5);
    }
}

//! YAML scene configuration.
//!
//! A scene file picks a camera, an optional lens override, a viewport, a
//! list of procedural models and the lights that shade them:
//!
//! ```yaml
//! name: gallery
//! viewport: { width: 1280, height: 720 }
//! camera:
//!   kind: fly
//!   position: [0.0, 2.0, 5.0]
//!   room: { half_extent: 15.0, eye_height: 2.0 }
//! projection:
//!   kind: perspective
//!   fov_y: 60.0
//!   aspect: 1.0
//!   near: 0.1
//!   far: 100.0
//! models:
//!   - name: statue
//!     mesh: icosahedron
//!     transform: { position: [0.0, 1.0, -4.0], scale: [0.5, 0.5, 0.5] }
//!     material: { shininess: 64.0 }
//! lights:
//!   - kind: directional
//!     direction: [1.0, -1.0, 0.0]
//!   - kind: spot
//!     position: [0.0, 3.5, -2.0]
//!     direction: [0.0, -1.0, 1.0]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cg_scene::SceneConfig;
//!
//! let config = SceneConfig::from_yaml_str("camera: { kind: orbit, radius: 5.0 }")?;
//! let camera = config.build_camera()?;
//! let view_proj = camera.view_projection(config.aspect());
//! # Ok::<(), cg_scene::SceneError>(())
//! ```

use std::path::Path;

use cg_core::PI_HALF;
use cg_math::projection::Projection;
use cg_math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::camera::{viewport_aspect, Camera, FlyCamera, OrbitCamera};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{cube, icosahedron, Mesh};
use crate::light::{shade_vertices, Light, Material};
use crate::transform::Transform;

/// Framebuffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Square walking area for a fly camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Half the side length of the room.
    pub half_extent: f32,
    /// Fixed eye height.
    pub eye_height: f32,
}

fn default_fly_yaw() -> f32 {
    -90.0
}

fn default_move_speed() -> f32 {
    FlyCamera::DEFAULT_MOVE_SPEED
}

fn default_look_speed() -> f32 {
    FlyCamera::DEFAULT_LOOK_SPEED
}

fn default_orbit_yaw() -> f32 {
    PI_HALF
}

fn default_rotate_speed() -> f32 {
    OrbitCamera::DEFAULT_ROTATE_SPEED
}

fn default_zoom_speed() -> f32 {
    OrbitCamera::DEFAULT_ZOOM_SPEED
}

/// Camera section of a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraConfig {
    /// First-person camera; angles in degrees.
    Fly {
        /// Eye position.
        #[serde(default)]
        position: Vec3,
        /// Heading in degrees.
        #[serde(default = "default_fly_yaw")]
        yaw: f32,
        /// Elevation in degrees.
        #[serde(default)]
        pitch: f32,
        /// Units per second.
        #[serde(default = "default_move_speed")]
        move_speed: f32,
        /// Degrees per second per unit of input.
        #[serde(default = "default_look_speed")]
        look_speed: f32,
        /// Optional walking area.
        #[serde(default)]
        room: Option<RoomConfig>,
    },
    /// Orbiting camera; angles in radians.
    Orbit {
        /// Orbit center.
        #[serde(default)]
        target: Vec3,
        /// Orbit radius.
        radius: f32,
        /// Heading in radians.
        #[serde(default = "default_orbit_yaw")]
        yaw: f32,
        /// Elevation in radians.
        #[serde(default)]
        pitch: f32,
        /// Radians per second per unit of input.
        #[serde(default = "default_rotate_speed")]
        rotate_speed: f32,
        /// Radius units per second per unit of input.
        #[serde(default = "default_zoom_speed")]
        zoom_speed: f32,
    },
}

/// Built-in procedural meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshKind {
    /// Regular icosahedron, see [`icosahedron`].
    Icosahedron,
    /// Unit cube, see [`cube`].
    Cube,
}

impl MeshKind {
    /// Generates the mesh.
    pub fn build(self) -> Mesh {
        match self {
            Self::Icosahedron => icosahedron(),
            Self::Cube => cube(),
        }
    }
}

/// A placed model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Display name.
    pub name: String,
    /// Which mesh to generate.
    pub mesh: MeshKind,
    /// Placement in the world.
    #[serde(default)]
    pub transform: Transform,
    /// Surface reflectance.
    #[serde(default)]
    pub material: Material,
}

/// A complete scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Scene name.
    #[serde(default)]
    pub name: Option<String>,
    /// Framebuffer size, used for the projection aspect ratio.
    #[serde(default)]
    pub viewport: Viewport,
    /// Camera model and state.
    pub camera: CameraConfig,
    /// Lens override; the aspect ratio is always taken from the viewport.
    #[serde(default)]
    pub projection: Option<Projection>,
    /// Models to place.
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    /// Light sources.
    #[serde(default)]
    pub lights: Vec<Light>,
}

impl SceneConfig {
    /// Loads and validates a scene file.
    pub fn from_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SceneError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            name = config.name.as_deref().unwrap_or("<unnamed>"),
            models = config.models.len(),
            "loaded scene config"
        );
        Ok(config)
    }

    /// Parses and validates a scene from YAML.
    pub fn from_yaml_str(yaml: &str) -> SceneResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        debug!(camera = ?config.camera, viewport = ?config.viewport, "parsed scene config");
        Ok(config)
    }

    /// Serializes back to YAML.
    pub fn to_yaml(&self) -> SceneResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks value ranges that the YAML schema cannot express.
    pub fn validate(&self) -> SceneResult<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(SceneError::invalid(
                "viewport",
                format!("{}x{} has no area", self.viewport.width, self.viewport.height),
            ));
        }

        match &self.camera {
            CameraConfig::Fly {
                move_speed,
                look_speed,
                room,
                ..
            } => {
                if !(move_speed.is_finite() && look_speed.is_finite()) {
                    return Err(SceneError::invalid("camera", "speeds must be finite"));
                }
                if let Some(room) = room {
                    if !(room.half_extent > 0.0) {
                        return Err(SceneError::invalid(
                            "room.half_extent",
                            format!("{} must be positive", room.half_extent),
                        ));
                    }
                }
            }
            CameraConfig::Orbit { radius, .. } => {
                if !(*radius > 0.0 && radius.is_finite()) {
                    return Err(SceneError::invalid(
                        "radius",
                        format!("{radius} must be positive"),
                    ));
                }
            }
        }

        for light in &self.lights {
            light.check()?;
        }

        if let Some(projection) = self.projection {
            projection.with_aspect(self.aspect()).try_matrix()?;
        }
        Ok(())
    }

    /// Viewport aspect ratio.
    pub fn aspect(&self) -> f32 {
        viewport_aspect(self.viewport.width, self.viewport.height)
    }

    /// Lens for the camera: the override if present, else the default.
    pub fn lens(&self) -> Projection {
        self.projection.unwrap_or_default().with_aspect(self.aspect())
    }

    /// Builds the configured camera.
    pub fn build_camera(&self) -> SceneResult<Box<dyn Camera>> {
        let lens = self.lens();
        let camera: Box<dyn Camera> = match self.camera {
            CameraConfig::Fly {
                position,
                yaw,
                pitch,
                move_speed,
                look_speed,
                room,
            } => {
                let mut cam = FlyCamera::new(position)
                    .with_angles(yaw, pitch)
                    .with_lens(lens);
                cam.move_speed = move_speed;
                cam.look_speed = look_speed;
                if let Some(room) = room {
                    cam = cam.with_room(room.half_extent, room.eye_height);
                }
                Box::new(cam)
            }
            CameraConfig::Orbit {
                target,
                radius,
                yaw,
                pitch,
                rotate_speed,
                zoom_speed,
            } => {
                let mut cam = OrbitCamera::new(target, radius)
                    .with_angles(yaw, pitch)
                    .with_lens(lens);
                cam.rotate_speed = rotate_speed;
                cam.zoom_speed = zoom_speed;
                Box::new(cam)
            }
        };
        debug!(position = ?camera.position(), "built camera");
        Ok(camera)
    }

    /// Generates every model's mesh in world space.
    pub fn build_models(&self) -> Vec<(String, Mesh)> {
        self.models
            .iter()
            .map(|m| (m.name.clone(), m.mesh.build().transformed(&m.transform.matrix())))
            .collect()
    }

    /// Gouraud vertex colors for every model as seen from `eye`.
    ///
    /// Colors run parallel to [`Mesh::flat_vertices`] of the world-space
    /// mesh, so each triangle is lit with its own face normal.
    pub fn shade_models(&self, eye: Vec3) -> Vec<(String, Vec<Vec3>)> {
        self.models
            .iter()
            .zip(self.build_models())
            .map(|(model, (name, mesh))| {
                let colors = shade_vertices(
                    &mesh.flat_vertices(),
                    &mesh.flat_normals(),
                    &self.lights,
                    &model.material,
                    eye,
                );
                (name, colors)
            })
            .collect()
    }
}

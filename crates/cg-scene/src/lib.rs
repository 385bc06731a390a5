//! # cg-scene
//!
//! Scene-level building blocks on top of `cg-math`.
//!
//! - [`camera`] - fly and orbit cameras behind the [`Camera`] trait
//! - [`Transform`] - position/rotation/scale model placement
//! - [`geometry`] - triangles, meshes, normals, procedural solids
//! - [`light`] - directional, point and spot lights with Phong shading
//! - [`SceneConfig`] - YAML scene descriptions
//!
//! Everything here produces plain [`cg_math::Mat4`] values and float
//! buffers; uploading them to a GPU is the caller's business.
//!
//! # Usage
//!
//! ```rust
//! use cg_scene::camera::{Camera, OrbitCamera};
//! use cg_scene::geometry::icosahedron;
//! use cg_scene::Transform;
//! use cg_math::Vec3;
//!
//! let camera = OrbitCamera::new(Vec3::ZERO, 6.0);
//! let model = Transform::from_position(Vec3::new(0.0, 1.0, 0.0)).matrix();
//! let mvp = model * camera.view_projection(16.0 / 9.0);
//!
//! let mesh = icosahedron();
//! let normals = mesh.flat_normals();
//! ```
//!
//! # Logging
//!
//! Uses `tracing`: config loading at `info`/`debug`, camera clamping at
//! `trace`, degenerate geometry at `warn`. Install a subscriber to see it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod light;
pub mod transform;

pub use camera::{Camera, Direction, FlyCamera, OrbitCamera};
pub use config::{CameraConfig, MeshKind, ModelConfig, SceneConfig, Viewport};
pub use error::{SceneError, SceneResult};
pub use geometry::{Aabb, Mesh, Triangle};
pub use light::{DirectionalLight, Light, Material, PointLight, SpotLight};
pub use transform::Transform;

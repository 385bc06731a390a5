//! # cg-math
//!
//! Linear algebra for real-time 3D graphics.
//!
//! This crate provides the primitives a renderer feeds to its shaders:
//!
//! - [`Vec2`], [`Vec3`], [`Vec4`] - positions, directions, texture coordinates
//! - [`Quat`] - rotations and spherical interpolation ([`slerp`])
//! - [`Mat4`] - model/view/projection matrices, determinant and inverse
//! - [`projection`] - [`perspective`], [`orthographic`] and [`look_at`] builders
//! - [`simd`] - batch vertex transforms
//!
//! # Design
//!
//! Matrices are stored **row-major** and use **row vectors**:
//!
//! ```text
//! result = vector * matrix
//! ```
//!
//! Translation lives in the last row. The resulting 16 floats are laid out
//! exactly like an OpenGL column-major matrix, so [`Mat4::as_array`] can be
//! uploaded without transposing.
//!
//! Hot-path operations never fail: normalizing a zero vector or inverting a
//! singular matrix yields NaN/Inf. Every such operation has a `try_*` twin
//! returning [`cg_core::Result`].
//!
//! # Usage
//!
//! ```rust
//! use cg_math::{look_at, perspective, Mat4, Quat, Vec3};
//!
//! let mut model = Mat4::IDENTITY;
//! model.rotate(Quat::from_axis_angle(Vec3::Y, 45.0));
//!
//! let view = look_at(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, Vec3::Y);
//! let proj = perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
//!
//! let mvp = model * view * proj;
//! let uniform: &[f32; 16] = mvp.as_array();
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - conversion target and test oracle
//! - [`wide`] - portable SIMD for [`simd`]
//! - [`bytemuck`] - flat float views for uniform uploads
//! - [`rayon`] - parallel batch transforms
//! - `serde` (optional) - serialization of all value types
//!
//! # Used By
//!
//! - `cg-scene` - cameras, transforms, geometry
//! - `cg-cli` - the `cg` command line tool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod macros;

mod interp;
mod mat4;
mod quat;
mod vec2;
mod vec3;
mod vec4;
pub mod projection;
pub mod simd;

pub use interp::*;
pub use mat4::*;
pub use projection::{look_at, orthographic, perspective, Projection};
pub use quat::*;
pub use vec2::*;
pub use vec3::*;
pub use vec4::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{Mat4 as GlamMat4, Quat as GlamQuat, Vec3 as GlamVec3, Vec4 as GlamVec4};
}

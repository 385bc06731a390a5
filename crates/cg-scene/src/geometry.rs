//! Triangle geometry, normals and procedural meshes.
//!
//! A [`Mesh`] is an indexed triangle list. Renderers that want one normal
//! per face expand it with [`Mesh::flat_vertices`] / [`Mesh::flat_normals`];
//! smooth shading uses [`Mesh::vertex_normals`].
//!
//! # Usage
//!
//! ```rust
//! use cg_scene::geometry::icosahedron;
//!
//! let mesh = icosahedron();
//! assert_eq!(mesh.triangle_count(), 20);
//!
//! let positions = mesh.flat_vertices();
//! let normals = mesh.flat_normals();
//! assert_eq!(positions.len(), normals.len());
//! ```

use cg_math::simd::{transform_points, transform_vectors};
use cg_math::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`, or `None` for no points.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(first, first), |b, &p| {
            Self::new(b.min.min(p), b.max.max(p))
        }))
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Edge lengths.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True if `p` lies inside or on the boundary.
    pub fn contains(&self, p: Vec3) -> bool {
        p.clamp(self.min, self.max) == p
    }
}

/// A triangle given by three corners in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner.
    pub a: Vec3,
    /// Second corner.
    pub b: Vec3,
    /// Third corner.
    pub c: Vec3,
}

impl Triangle {
    /// Creates a triangle.
    pub const fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unnormalized normal, `(b - a) x (c - a)`. Its length is twice the area.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Unit normal. NaN for a degenerate triangle.
    pub fn unit_normal(&self) -> Vec3 {
        self.normal().normalized()
    }

    /// Unit normal, or an error for a degenerate triangle.
    pub fn try_unit_normal(&self) -> cg_core::Result<Vec3> {
        self.normal().try_normalized()
    }

    /// Average of the three corners.
    pub fn centroid(&self) -> Vec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Surface area.
    pub fn area(&self) -> f32 {
        0.5 * self.normal().magnitude()
    }
}

/// Indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Counter-clockwise vertex indices, one entry per triangle.
    pub indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from positions and triangle indices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self { positions, indices }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Iterates the triangles.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `positions`.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            Triangle::new(
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            )
        })
    }

    /// One unit normal per triangle. Degenerate triangles get a zero normal.
    pub fn face_normals(&self) -> Vec<Vec3> {
        self.triangles()
            .enumerate()
            .map(|(i, t)| {
                t.try_unit_normal().unwrap_or_else(|_| {
                    warn!(triangle = i, "degenerate triangle has no normal");
                    Vec3::ZERO
                })
            })
            .collect()
    }

    /// One unit normal per vertex, averaging adjacent faces weighted by
    /// their area. Vertices without a valid adjacent face get a zero normal.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut sums = vec![Vec3::ZERO; self.positions.len()];
        for (t, &idx) in self.triangles().zip(&self.indices) {
            let n = t.normal();
            for i in idx {
                sums[i as usize] += n;
            }
        }
        sums.into_iter()
            .enumerate()
            .map(|(i, n)| {
                n.try_normalized().unwrap_or_else(|_| {
                    warn!(vertex = i, "vertex has no adjacent face area");
                    Vec3::ZERO
                })
            })
            .collect()
    }

    /// Positions expanded to three vertices per triangle.
    pub fn flat_vertices(&self) -> Vec<Vec3> {
        self.triangles().flat_map(|t| [t.a, t.b, t.c]).collect()
    }

    /// Face normals repeated for each of the three triangle vertices,
    /// parallel to [`Mesh::flat_vertices`].
    pub fn flat_normals(&self) -> Vec<Vec3> {
        self.face_normals().into_iter().flat_map(|n| [n; 3]).collect()
    }

    /// Debug line segments from each face centroid along its unit normal.
    pub fn normal_lines(&self, length: f32) -> Vec<[Vec3; 2]> {
        self.triangles()
            .zip(self.face_normals())
            .map(|(t, n)| {
                let start = t.centroid();
                [start, start + length * n]
            })
            .collect()
    }

    /// Bounding box of the vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f32 {
        self.triangles().map(|t| t.area()).sum()
    }

    /// Copy of the mesh with positions transformed by `m`.
    ///
    /// Winding is preserved, so a mirroring `m` flips the normals.
    pub fn transformed(&self, m: &Mat4) -> Self {
        Self::new(transform_points(m, &self.positions), self.indices.clone())
    }
}

/// Transforms normals by a normal matrix and renormalizes them.
pub fn transform_normals(normal_matrix: &Mat4, normals: &[Vec3]) -> Vec<Vec3> {
    transform_vectors(normal_matrix, normals)
        .into_iter()
        .map(Vec3::normalized)
        .collect()
}

/// Regular icosahedron with vertices at distance `sqrt(1 + 1/phi^2)` from
/// the origin.
pub fn icosahedron() -> Mesh {
    let phi = (1.0 + 5f32.sqrt()) * 0.5;
    let a = 1.0;
    let b = 1.0 / phi;

    let positions = vec![
        Vec3::new(0.0, b, -a),
        Vec3::new(b, a, 0.0),
        Vec3::new(-b, a, 0.0),
        Vec3::new(0.0, b, a),
        Vec3::new(0.0, -b, a),
        Vec3::new(-a, 0.0, b),
        Vec3::new(0.0, -b, -a),
        Vec3::new(a, 0.0, -b),
        Vec3::new(a, 0.0, b),
        Vec3::new(-a, 0.0, -b),
        Vec3::new(b, -a, 0.0),
        Vec3::new(-b, -a, 0.0),
    ];
    let indices = vec![
        [2, 1, 0],
        [1, 2, 3],
        [5, 4, 3],
        [4, 8, 3],
        [7, 6, 0],
        [6, 9, 0],
        [11, 10, 4],
        [10, 11, 6],
        [9, 5, 2],
        [5, 9, 11],
        [8, 7, 1],
        [7, 8, 10],
        [2, 5, 3],
        [8, 1, 3],
        [9, 2, 0],
        [1, 7, 0],
        [11, 9, 6],
        [7, 10, 6],
        [5, 11, 4],
        [10, 8, 4],
    ];
    Mesh::new(positions, indices)
}

/// Unit cube centered on the origin.
pub fn cube() -> Mesh {
    let h = 0.5;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let indices = vec![
        // +Z
        [4, 5, 6],
        [4, 6, 7],
        // -Z
        [1, 0, 3],
        [1, 3, 2],
        // +X
        [5, 1, 2],
        [5, 2, 6],
        // -X
        [0, 4, 7],
        [0, 7, 3],
        // +Y
        [7, 6, 2],
        [7, 2, 3],
        // -Y
        [0, 1, 5],
        [0, 5, 4],
    ];
    Mesh::new(positions, indices)
}

//! Mesh command - generate a procedural solid and report its geometry

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::{debug, info};

use cg_math::simd::par_transform_points;
use cg_scene::geometry::transform_normals;
use cg_scene::{Mesh, MeshKind, Transform};

use super::{format_vec3, print_json};
use crate::{MeshArgs, MeshShape};

impl From<MeshShape> for MeshKind {
    fn from(shape: MeshShape) -> Self {
        match shape {
            MeshShape::Icosahedron => MeshKind::Icosahedron,
            MeshShape::Cube => MeshKind::Cube,
        }
    }
}

pub fn run(args: MeshArgs, json: bool, verbose: bool) -> Result<()> {
    if let Some(len) = args.normal_lines {
        if !(len > 0.0 && len.is_finite()) {
            bail!("--normal-lines must be a positive length, got {}", len);
        }
    }

    let transform = Transform {
        position: args.translate,
        rotation: args.rotate,
        scale: args.scale,
    };
    let model = transform.matrix();
    let normal_matrix = transform
        .try_normal_matrix()
        .context("Model transform is singular")?;

    let local = MeshKind::from(args.shape).build();
    debug!(
        vertices = local.positions.len(),
        triangles = local.triangle_count(),
        "generated mesh"
    );

    let world = Mesh::new(par_transform_points(&model, &local.positions), local.indices.clone());
    let normals = transform_normals(&normal_matrix, &local.face_normals());
    let area = world.surface_area();
    let bounds = world.bounds();
    info!(area, "mesh transformed");

    let lines = args.normal_lines.map(|len| world.normal_lines(len));

    if json {
        return print_json(&json!({
            "shape": format!("{:?}", MeshKind::from(args.shape)).to_lowercase(),
            "vertices": world.positions.len(),
            "triangles": world.triangle_count(),
            "surface_area": area,
            "bounds": bounds,
            "model": model,
            "positions": if verbose { Some(&world.positions) } else { None },
            "normals": if args.normals { Some(&normals) } else { None },
            "normal_lines": lines,
        }));
    }

    println!("{:?}", MeshKind::from(args.shape));
    println!("  Vertices:     {}", world.positions.len());
    println!("  Triangles:    {}", world.triangle_count());
    println!("  Surface area: {:.6}", area);
    if let Some(b) = bounds {
        println!("  Bounds min:   {}", format_vec3(b.min));
        println!("  Bounds max:   {}", format_vec3(b.max));
    }

    if verbose {
        println!("  Positions:");
        for (i, p) in world.positions.iter().enumerate() {
            println!("    {:>3}: {}", i, format_vec3(*p));
        }
    }

    if args.normals {
        println!("  Face normals:");
        for (i, n) in normals.iter().enumerate() {
            println!("    {:>3}: {}", i, format_vec3(*n));
        }
    }

    if let Some(lines) = lines {
        println!("  Normal lines:");
        for (i, [a, b]) in lines.iter().enumerate() {
            println!("    {:>3}: {} -> {}", i, format_vec3(*a), format_vec3(*b));
        }
    }
    Ok(())
}

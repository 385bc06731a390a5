//! Invert command - determinant and inverse of a 4x4 matrix

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use cg_math::Mat4;
use cg_scene::Transform;

use super::{parse_mat4, print_json, print_matrix};
use crate::InvertArgs;

pub fn run(args: InvertArgs, json: bool, verbose: bool) -> Result<()> {
    let m = match &args.matrix {
        Some(s) => parse_mat4(s)?,
        None => Transform {
            position: args.translate,
            rotation: args.rotate,
            scale: args.scale,
        }
        .matrix(),
    };

    let det = m.determinant();
    info!(determinant = det, "computed determinant");

    let inv = m
        .try_inverse()
        .with_context(|| format!("Matrix is not invertible (det = {det})"))?;
    let residual = residual(&m, &inv);

    if json {
        return print_json(&json!({
            "matrix": m,
            "determinant": det,
            "inverse": inv,
            "residual": residual,
        }));
    }

    print_matrix("Matrix", &m);
    println!("Determinant: {:.6}", det);
    print_matrix("Inverse", &inv);
    if verbose {
        println!("Max |M * M^-1 - I|: {:.3e}", residual);
    }
    Ok(())
}

/// Largest deviation of `m * inv` from the identity.
fn residual(m: &Mat4, inv: &Mat4) -> f32 {
    let product = *m * *inv;
    product
        .as_array()
        .iter()
        .zip(Mat4::IDENTITY.as_array())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_math::{Quat, Vec3};

    #[test]
    fn test_residual_small_for_rigid_transform() {
        let mut m = Mat4::IDENTITY;
        m.translate(Vec3::new(1.0, 2.0, 3.0))
            .rotate(Quat::from_axis_angle(Vec3::Y, 30.0));
        let inv = m.inverse();
        assert!(residual(&m, &inv) < 1e-5);
        assert_eq!(residual(&Mat4::IDENTITY, &Mat4::ZERO), 1.0);
    }
}

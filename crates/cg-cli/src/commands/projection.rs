//! Projection and view matrix commands

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use cg_math::projection::{try_look_at, try_orthographic, try_perspective};

use super::{format_vec3, print_json, print_matrix};
use crate::{LookAtArgs, OrthoArgs, PerspectiveArgs};

pub fn run_perspective(args: PerspectiveArgs, json: bool) -> Result<()> {
    debug!(fov = args.fov, aspect = args.aspect, near = args.near, far = args.far, "perspective");
    let m = try_perspective(args.fov, args.aspect, args.near, args.far)
        .context("Cannot build perspective projection")?;

    if json {
        return print_json(&json!({
            "kind": "perspective",
            "fov_y": args.fov,
            "aspect": args.aspect,
            "near": args.near,
            "far": args.far,
            "matrix": m,
        }));
    }

    println!(
        "Perspective fov={}° aspect={} near={} far={}",
        args.fov, args.aspect, args.near, args.far
    );
    print_matrix("Matrix", &m);
    Ok(())
}

pub fn run_ortho(args: OrthoArgs, json: bool) -> Result<()> {
    debug!(
        left = args.left,
        right = args.right,
        bottom = args.bottom,
        top = args.top,
        "orthographic"
    );
    let m = try_orthographic(args.left, args.right, args.bottom, args.top, args.near, args.far)
        .context("Cannot build orthographic projection")?;

    if json {
        return print_json(&json!({
            "kind": "orthographic",
            "left": args.left,
            "right": args.right,
            "bottom": args.bottom,
            "top": args.top,
            "near": args.near,
            "far": args.far,
            "matrix": m,
        }));
    }

    println!(
        "Orthographic x=[{}, {}] y=[{}, {}] z=[{}, {}]",
        args.left, args.right, args.bottom, args.top, args.near, args.far
    );
    print_matrix("Matrix", &m);
    Ok(())
}

pub fn run_look_at(args: LookAtArgs, json: bool) -> Result<()> {
    let m = try_look_at(args.eye, args.center, args.up).context("Cannot build view matrix")?;

    if json {
        return print_json(&json!({
            "eye": args.eye,
            "center": args.center,
            "up": args.up,
            "matrix": m,
        }));
    }

    println!(
        "LookAt eye={} center={} up={}",
        format_vec3(args.eye),
        format_vec3(args.center),
        format_vec3(args.up)
    );
    print_matrix("Matrix", &m);
    Ok(())
}

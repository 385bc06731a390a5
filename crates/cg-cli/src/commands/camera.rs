//! Camera command - evaluate the camera described by a scene file

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use cg_math::Vec3;
use cg_scene::SceneConfig;

use super::{format_vec3, print_json, print_matrix};
use crate::CameraArgs;

pub fn run(args: CameraArgs, json: bool, verbose: bool) -> Result<()> {
    let config = SceneConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load scene: {}", args.config.display()))?;
    let camera = config.build_camera()?;
    let aspect = config.aspect();

    let view = camera.view();
    let projection = camera.projection(aspect);
    let view_projection = camera.view_projection(aspect);
    info!(aspect, position = ?camera.position(), "camera ready");

    let models: Vec<_> = if args.models {
        let shaded = config.shade_models(camera.position());
        config
            .build_models()
            .into_iter()
            .zip(shaded)
            .map(|((name, mesh), (_, colors))| {
                (name, mesh.triangle_count(), mesh.bounds(), mean_color(&colors))
            })
            .collect()
    } else {
        Vec::new()
    };

    if json {
        let list: Vec<_> = models
            .iter()
            .map(|(name, triangles, bounds, color)| {
                json!({
                    "name": name,
                    "triangles": triangles,
                    "bounds": bounds,
                    "mean_color": color,
                })
            })
            .collect();
        return print_json(&json!({
            "scene": config.name,
            "aspect": aspect,
            "position": camera.position(),
            "lens": camera.lens().with_aspect(aspect),
            "view": view,
            "projection": projection,
            "view_projection": view_projection,
            "lights": config.lights,
            "models": list,
        }));
    }

    println!("{}", config.name.as_deref().unwrap_or("<unnamed scene>"));
    println!(
        "  Viewport: {}x{} (aspect {:.4})",
        config.viewport.width, config.viewport.height, aspect
    );
    println!("  Position: {}", format_vec3(camera.position()));
    println!("  Lights:   {}", config.lights.len());
    if verbose {
        println!("  Lens:     {:?}", camera.lens().with_aspect(aspect));
    }
    print_matrix("View", &view);
    print_matrix("Projection", &projection);
    print_matrix("View-Projection", &view_projection);

    if args.models {
        println!("Models:");
        for (name, triangles, bounds, color) in &models {
            match bounds {
                Some(b) => println!(
                    "  {:<16} {:>5} tris  min {}  max {}",
                    name,
                    triangles,
                    format_vec3(b.min),
                    format_vec3(b.max)
                ),
                None => println!("  {:<16} {:>5} tris  (empty)", name, triangles),
            }
            if verbose {
                println!("  {:<16} mean color {}", "", format_vec3(*color));
            }
        }
    }
    Ok(())
}

/// Average of per-vertex colors; black for an empty mesh.
fn mean_color(colors: &[Vec3]) -> Vec3 {
    if colors.is_empty() {
        return Vec3::ZERO;
    }
    colors.iter().fold(Vec3::ZERO, |acc, &c| acc + c) / colors.len() as f32
}

//! Slerp command - interpolate between two axis-angle rotations

use anyhow::{Result, bail};
use serde_json::json;
use tracing::debug;

use cg_math::{Quat, Vec3};

use super::{format_vec3, print_json};
use crate::SlerpArgs;

pub fn run(args: SlerpArgs, json: bool) -> Result<()> {
    if args.from_axis.magnitude() == 0.0 || args.to_axis.magnitude() == 0.0 {
        bail!("Rotation axes must be non-zero");
    }

    let from = Quat::from_axis_angle(args.from_axis, args.from_angle);
    let to = Quat::from_axis_angle(args.to_axis, args.to_angle);
    debug!(?from, ?to, "slerp endpoints");

    let ts: Vec<f32> = match args.steps {
        Some(0) => bail!("--steps must be at least 1"),
        Some(1) => vec![0.0],
        Some(n) => (0..n).map(|i| i as f32 / (n - 1) as f32).collect(),
        None => vec![args.t],
    };

    let samples: Vec<(f32, Quat)> = ts.iter().map(|&t| (t, Quat::slerp(from, to, t))).collect();

    if json {
        let list: Vec<_> = samples
            .iter()
            .map(|(t, q)| {
                json!({
                    "t": t,
                    "quat": q.to_array(),
                    "x_axis": q.rotate_vector(Vec3::X),
                })
            })
            .collect();
        return print_json(&json!({ "samples": list }));
    }

    println!("From: {:?}", from.to_array());
    println!("To:   {:?}", to.to_array());
    for (t, q) in &samples {
        let [x, y, z, w] = q.to_array();
        println!(
            "  t={:.3}  q=({:.6}, {:.6}, {:.6}, {:.6})  X -> {}",
            t,
            x,
            y,
            z,
            w,
            format_vec3(q.rotate_vector(Vec3::X))
        );
    }
    Ok(())
}

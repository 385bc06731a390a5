//! CLI command implementations

pub mod camera;
pub mod invert;
pub mod mesh;
pub mod projection;
pub mod slerp;

use anyhow::{Context, Result, bail};
use cg_math::{Mat4, Vec3};

/// Parse a vector string like "1,2,3"
pub fn parse_vec3(s: &str) -> Result<Vec3> {
    let values = parse_floats(s)?;
    if values.len() != 3 {
        bail!("Expected 3 comma-separated values, got {}: {}", values.len(), s);
    }
    Ok(Vec3::new(values[0], values[1], values[2]))
}

/// Parse a row-major matrix string of 16 comma-separated values
pub fn parse_mat4(s: &str) -> Result<Mat4> {
    let values = parse_floats(s)?;
    if values.len() != 16 {
        bail!("Expected 16 comma-separated values, got {}", values.len());
    }
    Ok(Mat4::from_slice(&values))
}

fn parse_floats(s: &str) -> Result<Vec<f32>> {
    s.split(',')
        .map(|p| {
            p.trim()
                .parse::<f32>()
                .with_context(|| format!("Invalid number '{}' in '{}'", p.trim(), s))
        })
        .collect()
}

/// Print a matrix as four aligned rows
pub fn print_matrix(label: &str, m: &Mat4) {
    println!("{}:", label);
    for i in 0..4 {
        let r = m.row(i);
        println!(
            "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            r[0], r[1], r[2], r[3]
        );
    }
}

/// Format a vector as "(x, y, z)"
pub fn format_vec3(v: Vec3) -> String {
    format!("({:.6}, {:.6}, {:.6})", v.x(), v.y(), v.z())
}

/// Print a JSON value on stdout
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1,2,3").unwrap(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(parse_vec3(" -1.5, 0 ,2e1").unwrap(), Vec3::new(-1.5, 0.0, 20.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_parse_mat4() {
        let m = parse_mat4("1,0,0,0, 0,1,0,0, 0,0,1,0, 4,5,6,1").unwrap();
        assert_eq!(m.row(3)[0], 4.0);
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(4.0, 5.0, 6.0));
        assert!(parse_mat4("1,2,3").is_err());
    }
}

//! cg - matrix, camera and mesh calculator for real-time graphics
//!
//! Prints the matrices a renderer would upload, in row-major order.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cg_math::Vec3;

mod commands;

use commands::parse_vec3;

#[derive(Parser)]
#[command(name = "cg")]
#[command(author, version, about = "Matrix, camera and mesh calculator for real-time graphics")]
#[command(long_about = "
Builds and inspects the 4x4 matrices used by an OpenGL-style renderer.
Matrices are row-major with row vectors (p' = p * M); translation is in row 3.

Examples:
  cg perspective --fov 45 --aspect 1.777 --near 0.1 --far 100
  cg ortho -10 10 -10 10 0.1 100
  cg look-at --eye 0,0,5 --center 0,0,0
  cg invert --translate 1,2,3 --rotate 0,90,0 --scale 2,2,2
  cg slerp --to-axis 0,1,0 --to-angle 90 -t 0.5
  cg camera --config scene.yaml
  cg mesh icosahedron --normals --json
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Machine-readable output (JSON)
    #[arg(long, global = true)]
    json: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Perspective projection matrix
    #[command(visible_alias = "p")]
    Perspective(PerspectiveArgs),

    /// Orthographic projection matrix
    #[command(visible_alias = "o")]
    Ortho(OrthoArgs),

    /// View matrix from eye, center and up
    #[command(name = "look-at", visible_alias = "l")]
    LookAt(LookAtArgs),

    /// Determinant and inverse of a matrix
    #[command(visible_alias = "i")]
    Invert(InvertArgs),

    /// Spherical interpolation between two rotations
    Slerp(SlerpArgs),

    /// Evaluate the camera of a YAML scene
    #[command(visible_alias = "c")]
    Camera(CameraArgs),

    /// Generate a procedural mesh and report its geometry
    #[command(visible_alias = "m")]
    Mesh(MeshArgs),
}

#[derive(Args)]
struct PerspectiveArgs {
    /// Vertical field of view in degrees
    #[arg(short, long, default_value = "45")]
    fov: f32,

    /// Width over height
    #[arg(short, long, default_value = "1")]
    aspect: f32,

    /// Near clip distance
    #[arg(short, long, default_value = "0.1")]
    near: f32,

    /// Far clip distance
    #[arg(short = 'F', long, default_value = "100")]
    far: f32,
}

#[derive(Args)]
struct OrthoArgs {
    /// Left plane
    #[arg(allow_negative_numbers = true)]
    left: f32,
    /// Right plane
    #[arg(allow_negative_numbers = true)]
    right: f32,
    /// Bottom plane
    #[arg(allow_negative_numbers = true)]
    bottom: f32,
    /// Top plane
    #[arg(allow_negative_numbers = true)]
    top: f32,
    /// Near plane
    #[arg(allow_negative_numbers = true)]
    near: f32,
    /// Far plane
    #[arg(allow_negative_numbers = true)]
    far: f32,
}

#[derive(Args)]
struct LookAtArgs {
    /// Eye position (x,y,z)
    #[arg(short, long, value_parser = parse_vec3)]
    eye: Vec3,

    /// Point to look at (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,0,0")]
    center: Vec3,

    /// Up direction (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,1,0")]
    up: Vec3,
}

#[derive(Args)]
struct InvertArgs {
    /// 16 comma-separated values in row-major order (overrides TRS options)
    #[arg(short, long)]
    matrix: Option<String>,

    /// Translation (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,0,0")]
    translate: Vec3,

    /// Euler rotation in degrees (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,0,0")]
    rotate: Vec3,

    /// Scale (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "1,1,1")]
    scale: Vec3,
}

#[derive(Args)]
struct SlerpArgs {
    /// Rotation axis of the start orientation (x,y,z)
    #[arg(long, value_parser = parse_vec3, default_value = "0,1,0")]
    from_axis: Vec3,

    /// Rotation angle of the start orientation in degrees
    #[arg(long, default_value = "0")]
    from_angle: f32,

    /// Rotation axis of the end orientation (x,y,z)
    #[arg(long, value_parser = parse_vec3, default_value = "0,1,0")]
    to_axis: Vec3,

    /// Rotation angle of the end orientation in degrees
    #[arg(long, default_value = "90")]
    to_angle: f32,

    /// Interpolation parameter
    #[arg(short, default_value = "0.5")]
    t: f32,

    /// Print this many evenly spaced samples from t=0 to t=1 instead
    #[arg(long)]
    steps: Option<usize>,
}

#[derive(Args)]
struct CameraArgs {
    /// Scene file (YAML)
    #[arg(short, long)]
    config: PathBuf,

    /// Also list the scene's models with their world bounds
    #[arg(long)]
    models: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MeshShape {
    Icosahedron,
    Cube,
}

#[derive(Args)]
struct MeshArgs {
    /// Which solid to generate
    #[arg(value_enum)]
    shape: MeshShape,

    /// Translation (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,0,0")]
    translate: Vec3,

    /// Euler rotation in degrees (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "0,0,0")]
    rotate: Vec3,

    /// Scale (x,y,z)
    #[arg(short, long, value_parser = parse_vec3, default_value = "1,1,1")]
    scale: Vec3,

    /// Print per-face normals
    #[arg(short, long)]
    normals: bool,

    /// Print debug normal segments of this length
    #[arg(long)]
    normal_lines: Option<f32>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Perspective(args) => commands::projection::run_perspective(args, cli.json),
        Commands::Ortho(args) => commands::projection::run_ortho(args, cli.json),
        Commands::LookAt(args) => commands::projection::run_look_at(args, cli.json),
        Commands::Invert(args) => commands::invert::run(args, cli.json, cli.verbose),
        Commands::Slerp(args) => commands::slerp::run(args, cli.json),
        Commands::Camera(args) => commands::camera::run(args, cli.json, cli.verbose),
        Commands::Mesh(args) => commands::mesh::run(args, cli.json, cli.verbose),
    }
}

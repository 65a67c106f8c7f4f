//! glint - render scene descriptions to numbered BMP captures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glint_core::{load_description, ObjectDesc, SceneDescription};
use glint_math::DVec3;
use glint_renderer::{Camera, RenderConfig, Scene, DEFAULT_BUCKET_SIZE};
use std::path::{Path, PathBuf};

mod capture;

use capture::CaptureSequence;

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Recursive ray tracer for text scene descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene description to BMP files
    Render {
        /// Path to the scene description
        description: PathBuf,
        /// Directory for Output_<n>.bmp files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Camera position as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,-200,35")]
        eye: DVec3,
        /// Point the camera looks at as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
        target: DVec3,
        /// World up direction as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,1")]
        up: DVec3,
        /// Number of images to render
        #[arg(short = 'n', long, default_value_t = 1)]
        captures: u32,
        /// Degrees to turn the camera left between captures
        #[arg(long, default_value_t = 0.0)]
        yaw_step: f64,
        /// Number used for the first output file
        #[arg(long, default_value_t = 1)]
        start_index: u32,
        /// Worker threads (default: one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
        /// Bucket edge length in pixels
        #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
        bucket_size: u32,
        /// Render on the main thread only
        #[arg(long)]
        sequential: bool,
    },
    /// Display information about a scene description
    Info {
        /// Path to the scene description
        description: PathBuf,
        /// Print the parsed description as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Render options that stay fixed across captures.
struct RenderArgs {
    output_dir: PathBuf,
    captures: u32,
    yaw_step: f64,
    start_index: u32,
    bucket_size: u32,
    sequential: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            description,
            output_dir,
            eye,
            target,
            up,
            captures,
            yaw_step,
            start_index,
            threads,
            bucket_size,
            sequential,
        } => {
            if let Some(threads) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("Failed to configure render threads")?;
            }

            let camera = Camera::looking_at(eye, target, up);
            let args = RenderArgs {
                output_dir,
                captures,
                yaw_step,
                start_index,
                bucket_size,
                sequential,
            };
            render_captures(&description, camera, &args)?;
        }
        Commands::Info { description, json } => {
            show_info(&description, json)?;
        }
    }

    Ok(())
}

fn render_captures(path: &Path, camera: Camera, args: &RenderArgs) -> Result<()> {
    let desc = load_description(path)
        .with_context(|| format!("Failed to load scene description {}", path.display()))?;

    let scene = Scene::from_description(&desc);
    let mut camera = camera.with_lens_desc(&desc.lens);
    let config = RenderConfig {
        pixel_size: desc.pixel_size,
        bucket_size: args.bucket_size,
        parallel: !args.sequential,
    };

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory {}", args.output_dir.display())
    })?;
    let mut sequence = CaptureSequence::new(&args.output_dir, args.start_index);

    for capture in 0..args.captures {
        if capture > 0 {
            camera.yaw(args.yaw_step.to_radians());
        }

        let (target, _) = glint_renderer::render(&scene, &camera, &config);
        let output = sequence.next_path();
        target
            .save_bmp(&output)
            .with_context(|| format!("Failed to save capture {}", capture + 1))?;
        println!("Wrote {}", output.display());
    }

    Ok(())
}

fn show_info(path: &Path, json: bool) -> Result<()> {
    let desc = load_description(path)
        .with_context(|| format!("Failed to load scene description {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&desc)?);
        return Ok(());
    }

    print_summary(path, &desc);
    Ok(())
}

fn print_summary(path: &Path, desc: &SceneDescription) {
    let count = |keyword: &str| {
        desc.objects
            .iter()
            .filter(|object| object.keyword() == keyword)
            .count()
    };

    println!("File: {}", path.display());
    println!(
        "Lens: near {} far {} fov {}° aspect {}",
        desc.lens.near, desc.lens.far, desc.lens.fov_y, desc.lens.aspect_ratio
    );
    println!("Resolution: {0}x{0}", desc.pixel_size);
    println!("Recursion depth: {}", desc.recursion_depth);
    println!("Floor tile width: {}", desc.floor.tile_width);
    println!(
        "Objects: {} ({} spheres, {} cubes, {} pyramids)",
        desc.objects.len(),
        count("sphere"),
        count("cube"),
        count("pyramid")
    );
    for object in &desc.objects {
        match object {
            ObjectDesc::Sphere { center, radius, .. } => {
                println!("  sphere at {center} radius {radius}");
            }
            ObjectDesc::Cube { origin, side, .. } => {
                println!("  cube at {origin} side {side}");
            }
            ObjectDesc::Pyramid {
                origin,
                width,
                height,
                ..
            } => {
                println!("  pyramid at {origin} width {width} height {height}");
            }
        }
    }
    println!(
        "Lights: {} point, {} spot",
        desc.point_lights.len(),
        desc.spot_lights.len()
    );
}

/// Parse `x,y,z` into a vector.
fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }

    let mut values = [0.0; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{part}': {e}"))?;
    }
    Ok(DVec3::from_array(values))
}

//! Triangulate an HRTF measurement grid
//!
//! Usage:
//!   cargo run --release --bin hrtf-hull -- --input grid.obj --obj hull.obj --validate
//!   cargo run --release --bin hrtf-hull -- --fibonacci 840 --matlab hull.m
//!   cargo run --release --bin hrtf-hull -- --help

use anyhow::{Context, bail};
use clap::Parser;
use hrtf_hull::testdata::{fibonacci_sphere_points, random_sphere_points};
use hrtf_hull::{HullConfig, Mesh, Vertex, export_m, export_obj, load_obj_vertices};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "hrtf-hull")]
#[command(about = "Convex hull triangulation of HRTF measurement directions", long_about = None)]
struct Args {
    /// Wavefront OBJ file with the measurement directions (`v` lines)
    #[arg(short, long, conflicts_with_all = ["fibonacci", "random"])]
    input: Option<PathBuf>,

    /// Use an N-point Fibonacci lattice on the unit sphere instead of a file
    #[arg(long, value_name = "N", conflicts_with = "random")]
    fibonacci: Option<usize>,

    /// Use N random points within 1% of the unit sphere instead of a file
    #[arg(long, value_name = "N")]
    random: Option<usize>,

    /// Path to JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the face ceiling
    #[arg(long)]
    max_faces: Option<usize>,

    /// Override the perturbation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the perturbation amplitude (fraction of each axis' spread)
    #[arg(long)]
    noise_fraction: Option<f64>,

    /// Write the effective configuration as JSON
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Output OBJ file path
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Only write hull vertices to the OBJ file (one copy per face corner)
    #[arg(long, requires = "obj")]
    keep_used: bool,

    /// Output MATLAB/Octave script path
    #[arg(long)]
    matlab: Option<PathBuf>,

    /// Run the closed-manifold, winding, Euler and convexity checks
    #[arg(long)]
    validate: bool,

    /// Convexity tolerance for --validate
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,

    /// Number of parallel threads (default: all cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

fn load_points(args: &Args, seed: u64) -> anyhow::Result<Vec<Vertex>> {
    if let Some(path) = &args.input {
        return load_obj_vertices(path).with_context(|| format!("reading {}", path.display()));
    }
    if let Some(n) = args.fibonacci {
        return Ok(fibonacci_sphere_points(n, 1.0));
    }
    if let Some(n) = args.random {
        let mut rng = StdRng::seed_from_u64(seed);
        return Ok(random_sphere_points(n, 1.0, 0.01, &mut rng));
    }
    bail!("no points given, use --input, --fibonacci or --random")
}

fn effective_config(args: &Args) -> anyhow::Result<HullConfig> {
    let mut config = match &args.config {
        Some(path) => HullConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => HullConfig::default(),
    };

    if let Some(max_faces) = args.max_faces {
        config.max_faces = max_faces;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(noise_fraction) = args.noise_fraction {
        config.noise_fraction = noise_fraction;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring the thread pool")?;
    }

    let config = effective_config(&args)?;
    if let Some(path) = &args.save_config {
        config.to_file(path)?;
        println!("Configuration written to {}", path.display());
    }

    let points = load_points(&args, config.seed)?;
    println!("Points: {}", points.len());

    let start = Instant::now();
    let mesh = Mesh::build(&points, &config)?;
    let elapsed = start.elapsed();

    println!("Faces: {}", mesh.num_faces());
    println!("Hull vertices: {}", mesh.used_vertices().len());
    println!("Volume: {:.6}", mesh.volume());
    println!("Surface area: {:.6}", mesh.surface_area());
    println!("Time: {:.2?}", elapsed);

    if args.validate {
        let report = mesh.validate(args.epsilon);
        println!("{}", report);
        if !report.is_valid() {
            bail!("hull failed validation");
        }
    }

    if let Some(path) = &args.obj {
        export_obj(&mesh, path, args.keep_used)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("OBJ written to {}", path.display());
    }
    if let Some(path) = &args.matlab {
        export_m(&mesh, path).with_context(|| format!("writing {}", path.display()))?;
        println!("MATLAB script written to {}", path.display());
    }

    Ok(())
}

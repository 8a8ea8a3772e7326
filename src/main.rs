use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lorenz_wave::{LorenzParams, Viewer, ViewerConfig};

/// Animated Lorenz attractor.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of trajectory points (one sphere each).
    #[arg(short = 'n', long, default_value_t = 100_000)]
    samples: usize,

    /// Worker threads per animation pass.
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Frames spent moving from one point to the next.
    #[arg(short, long, default_value_t = 100)]
    steps: u32,

    /// Euler integration step.
    #[arg(long, default_value_t = 0.01)]
    dt: f32,

    #[arg(long, default_value_t = 10.0)]
    sigma: f32,

    #[arg(long, default_value_t = 28.0)]
    rho: f32,

    #[arg(long, default_value_t = 8.0 / 3.0)]
    beta: f32,

    /// Sphere radius.
    #[arg(long, default_value_t = 0.1)]
    radius: f32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Write every frame to DIR/frame_<N>.png.
    #[arg(long, value_name = "DIR")]
    capture: Option<PathBuf>,
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        ViewerConfig {
            samples: args.samples,
            threads: args.threads,
            steps: args.steps,
            lorenz: LorenzParams {
                dt: args.dt,
                sigma: args.sigma,
                rho: args.rho,
                beta: args.beta,
                initial: LorenzParams::CLASSIC.initial,
            },
            sphere_radius: args.radius,
            width: args.width,
            height: args.height,
            capture_dir: args.capture,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::from(Args::parse());
    Viewer::from_config(config)
        .run()
        .context("viewer exited with an error")?;

    Ok(())
}

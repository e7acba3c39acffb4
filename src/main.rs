use idealgas::config::{ConfigDelta, Settings};
use idealgas::core::FrameDriver;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

/// Run the gas model headless and report energy and momentum.
#[derive(Parser, Debug)]
struct Args {
    /// YAML settings file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to drive.
    #[arg(short, long, default_value_t = 1000)]
    frames: u64,

    /// Overrides the seed from the settings file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a report every K frames.
    #[arg(short, long, default_value_t = 100)]
    report_every: u64,

    /// Temperature to switch to halfway through the run.
    #[arg(long)]
    reheat: Option<f64>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    Ok(settings)
}

/// Frame halfway through the run, never before the first.
fn reheat_frame(frames: u64) -> u64 {
    (frames / 2).max(1)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;
    let mut driver = FrameDriver::from_settings(&settings)?;

    let stats = driver.simulation().thermal_stats();
    info!(
        particles = driver.simulation().num_particles(),
        v_avg = stats.average_velocity,
        v_mean = stats.mean_speed,
        v_peak = stats.most_probable_speed,
        "starting"
    );

    let report_every = args.report_every.max(1);
    let reheat_frame = reheat_frame(args.frames);
    for frame in 1..=args.frames {
        let delta = match args.reheat {
            Some(t) if frame == reheat_frame => ConfigDelta::new().with_temperature(t),
            _ => ConfigDelta::default(),
        };
        let outcome = driver.frame(&delta);

        if frame % report_every == 0 {
            let sim = driver.simulation();
            let p = sim.momentum();
            info!(
                frame,
                energy = sim.kinetic_energy(),
                px = p.x,
                py = p.y,
                collisions = outcome.step.map_or(0, |s| s.pair_collisions),
                "report"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reheat_frame_is_reachable() {
        assert_eq!(reheat_frame(1), 1);
        assert_eq!(reheat_frame(0), 1);
        assert_eq!(reheat_frame(1000), 500);
    }
}

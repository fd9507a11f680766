use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use spinning_hexagon::{Simulation, SimulationConfig};

/// Runs the bouncing-ball simulation without a window and logs its state.
#[derive(Parser, Debug)]
#[command(about = "Ball bouncing inside a spinning polygon, headless", version)]
struct Args {
    /// RON config file; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
    /// Frames per second fed to the fixed-step accumulator.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
    /// Log a state line every N frames (0 disables).
    #[arg(long, default_value_t = 30)]
    report_every: u64,
    /// Override the boundary spin in rad/s.
    #[arg(long, allow_hyphen_values = true)]
    spin: Option<f64>,
    /// Reverse the spin halfway through the run.
    #[arg(long)]
    reverse: bool,
    /// Print the effective config as RON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(spin) = args.spin {
        config.boundary.angular_velocity = spin;
    }

    if args.dump_config {
        println!("{}", config.to_ron_string()?);
        return Ok(());
    }

    anyhow::ensure!(args.fps.is_finite() && args.fps > 0.0, "--fps must be > 0");
    anyhow::ensure!(args.seconds.is_finite() && args.seconds >= 0.0, "--seconds must be >= 0");

    let mut sim = Simulation::new(&config).context("building simulation")?;
    let frame_dt = 1.0 / args.fps;
    let frames = (args.seconds * args.fps).round() as u64;
    let halfway = frames / 2;

    info!(
        "{} sides, R = {}, omega = {} rad/s, {} frames at {} fps",
        config.boundary.side_count,
        config.boundary.circumradius,
        sim.boundary().angular_velocity(),
        frames,
        args.fps
    );

    let mut contacts = 0u64;
    let mut escapes = 0u64;
    let mut peak_energy = sim.kinetic_energy();

    for frame in 0..frames {
        if args.reverse && frame == halfway && frame > 0 {
            sim.reverse_rotation();
            info!("frame {frame}: rotation reversed, omega = {}", sim.boundary().angular_velocity());
        }

        let ticks = sim.advance(frame_dt);
        let report = *sim.last_report();
        if ticks > 0 && report.impulse_applied {
            contacts += 1;
        }
        if ticks > 0 && report.escaped {
            escapes += 1;
            warn!("frame {frame}: body escaped and was reset");
        }
        peak_energy = peak_energy.max(sim.kinetic_energy());

        if args.report_every > 0 && frame % args.report_every == 0 {
            let body = sim.body();
            info!(
                "frame {:>5} t={:>7.3}s pos=({:>8.2}, {:>8.2}) vel=({:>8.2}, {:>8.2}) ke={:>10.1} angle={:.3}",
                frame,
                sim.ticks() as f64 * sim.fixed_dt(),
                body.position.x,
                body.position.y,
                body.velocity.x,
                body.velocity.y,
                sim.kinetic_energy(),
                sim.boundary().angle()
            );
        }
    }

    info!(
        "done: {} ticks, {} bounces, {} escapes, peak ke {:.1}, final ke {:.1}",
        sim.ticks(),
        contacts,
        escapes,
        peak_energy,
        sim.kinetic_energy()
    );
    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Parser;
use orbyte::Simulation;
use orbyte::config::load_scenario;
use orbyte::export::{SaveFile, write_auto, write_trails, writer_for_path};
use orbyte::math::time::seconds_to_days;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Run an Orbyte scenario headless and report the final body states"
)]
struct Cli {
    /// Scenario manifest (YAML or TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 1000)]
    frames: u64,

    /// Wall-clock milliseconds per frame
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Override the scenario time scale (simulated seconds per wall second, 0 pauses)
    #[arg(long)]
    time_scale: Option<f64>,

    /// Print a progress line every N frames (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,

    /// Save the final state (.orbyte for the binary format, anything else as JSON)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write body trails as CSV (`-` for stdout)
    #[arg(long)]
    trails: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(
        cli.frame_ms.is_finite() && cli.frame_ms >= 0.0,
        "--frame-ms must be a non-negative number"
    );

    let scenario = load_scenario(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;
    let mut sim = Simulation::from_scenario(&scenario)?;
    if let Some(scale) = cli.time_scale {
        sim.clock_mut().set_time_scale(scale)?;
        log::info!("time scale overridden to {scale}");
    }
    log::info!("running {} frames of {} ms", cli.frames, cli.frame_ms);

    println!(
        "Scenario: {} ({} bodies around {}, time scale {})",
        scenario.name.as_deref().unwrap_or("<unnamed>"),
        sim.len(),
        sim.central().name(),
        sim.clock().time_scale()
    );

    for frame in 1..=cli.frames {
        let report = sim.tick(cli.frame_ms);
        if cli.report_every > 0 && frame % cli.report_every == 0 {
            println!(
                "frame {frame}: t = {:.3} days, {} bodies updated",
                seconds_to_days(sim.clock().simulated_seconds()),
                report.updated
            );
        }
    }

    println!(
        "Simulated {:.3} days over {} frames",
        seconds_to_days(sim.clock().simulated_seconds()),
        sim.clock().frames()
    );
    print_state(&sim);

    if let Some(path) = &cli.save {
        write_auto(path, &SaveFile::capture(&sim))
            .with_context(|| format!("saving to {}", path.display()))?;
        println!("Saved state to {}", path.display());
    }
    if let Some(path) = &cli.trails {
        let mut writer = writer_for_path(path)?;
        let rows = write_trails(&sim, writer.as_mut())?;
        log::info!("wrote {rows} trail points to {}", path.display());
    }
    Ok(())
}

fn print_state(sim: &Simulation) {
    println!(
        "{:<16} {:<16} {:>16} {:>14} {:>14}",
        "Body", "Orbits", "Distance (km)", "Speed (km/s)", "Period (days)"
    );
    for body in sim.visible_bodies() {
        let parent = body
            .parent()
            .and_then(|id| sim.body(id))
            .map(|p| p.name())
            .unwrap_or(sim.central().name());
        let period = sim
            .calculate_period(body.id())
            .map(|p| format!("{:.3}", seconds_to_days(p)))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:<16} {:>16.1} {:>14.3} {:>14}",
            body.name(),
            parent,
            body.position().magnitude() / 1_000.0,
            body.velocity().magnitude() / 1_000.0,
            period
        );
    }
}

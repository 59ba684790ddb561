use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use orbyte::export::read_auto;
use orbyte::math::time::seconds_to_days;

#[derive(Parser)]
#[command(author, version, about = "Print the bodies stored in an Orbyte save file")]
struct Cli {
    /// Save file (.orbyte binary or JSON)
    save: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let save = read_auto(&cli.save).with_context(|| format!("reading {}", cli.save.display()))?;
    let sim = save.restore()?;
    log::debug!("restored {} bodies (save version {})", sim.len(), save.version);

    println!(
        "Central: {} (mass {:.4e} kg, scale {:.1} m)",
        save.central.name, save.central.mass, save.central.scale
    );
    println!(
        "Mode: {:?}, time scale {}, {} bodies",
        sim.mode(),
        sim.clock().time_scale(),
        sim.len()
    );

    for (body, saved) in sim.bodies().zip(&save.bodies) {
        let parent = saved
            .parent
            .map(|slot| save.bodies[slot].record.name.as_str())
            .unwrap_or(save.central.name.as_str());
        let period = sim
            .calculate_period(body.id())
            .map(|p| format!("{:.3} days", seconds_to_days(p)))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {} orbits {}: r = {:.1} km, v = {:.3} km/s, mass {:.4e} kg, period {}",
            body.name(),
            parent,
            body.position().magnitude() / 1_000.0,
            body.velocity().magnitude() / 1_000.0,
            body.mass(),
            period
        );
    }
    Ok(())
}

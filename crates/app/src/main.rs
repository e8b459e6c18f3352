//! Command-line driver: run a configured arm simulation under a scripted
//! activation pattern and dump the trajectory to CSV.
//!
//! Usage: `arm-sim [config.json]`. Without an argument the default
//! configuration (Li arm, direct drive, bounded joints, 5 ms ticks) is used.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use simcore::{SimulationConfig, TimestepPolicy};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use stepper::ArmSimulation;

const TICKS: usize = 2000;
const LOG_EVERY: usize = 200;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path)?;
            let config: SimulationConfig = serde_json::from_reader(file)?;
            log::info!("configuration loaded from {path}");
            config
        }
        None => SimulationConfig::default(),
    };

    let mut sim = ArmSimulation::new(config)?;
    let arity = sim.signal_arity();

    let mut csv = File::create("arm_trajectory.csv")?;
    writeln!(
        csv,
        "t,shoulder_angle,elbow_angle,shoulder_velocity,elbow_velocity,shoulder_torque,elbow_torque"
    )?;

    let mut last = Instant::now();
    for i in 0..TICKS {
        let dt = match config.timestep {
            TimestepPolicy::Fixed(dt) => dt,
            TimestepPolicy::WallClock => {
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f64().max(1e-6);
                last = now;
                dt
            }
        };

        let signal = scripted_signal(i, arity);
        match sim.tick(&signal, dt) {
            Ok(out) => {
                writeln!(
                    csv,
                    "{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                    sim.elapsed(),
                    out.joint.angle[0],
                    out.joint.angle[1],
                    out.joint.velocity[0],
                    out.joint.velocity[1],
                    out.torque[0],
                    out.torque[1]
                )?;
            }
            Err(err) if err.is_recoverable() => {
                log::warn!("tick {i} rejected: {err}");
            }
            Err(err) => return Err(err.into()),
        }

        if i % LOG_EVERY == 0 {
            let angle = sim.angle();
            let velocity = sim.velocity();
            log::info!(
                "t={:.3}s angle=[{:.3}, {:.3}] velocity=[{:.3}, {:.3}]",
                sim.elapsed(),
                angle[0],
                angle[1],
                velocity[0],
                velocity[1]
            );
        }
    }

    log::info!("simulated {:.3}s over {TICKS} ticks", sim.elapsed());
    println!("Wrote arm_trajectory.csv");
    Ok(())
}

/// Alternate agonist and antagonist bursts so the arm swings back and forth
/// whatever the signal arity of the configured muscle variant.
fn scripted_signal(tick: usize, arity: usize) -> Vec<f64> {
    let phase = (tick / 250) % 2;
    let mut signal = vec![0.0; arity];
    for (i, s) in signal.iter_mut().enumerate() {
        // Even slots are flexors, odd slots extensors.
        if i % 2 == phase {
            *s = 0.4;
        }
    }
    signal
}

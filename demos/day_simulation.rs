//! Day-long gate simulation
//!
//! Replays the same 24 hours against the in-process controller model and
//! against the exported C ABI, checks that both produce the same trace and
//! writes the model trace as CSV.
//!
//! Run with: cargo run --example day_simulation [-- config.json]
//! Set RUST_LOG=gate_controller=debug to see every state change.

use chrono::{TimeZone, Utc};
use gate_controller::ffi::ExportedController;
use gate_controller::simulation::{run_from, SimulationConfig};
use gate_controller::GateController;
use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use tracing_subscriber::EnvFilter;

const CSV_PATH: &str = "gate_simulation_24h.csv";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };

    println!("=== Gate Simulation ===\n");
    println!(
        "{} h at {} s per cycle ({} cycles), seed {}",
        config.duration_hours,
        config.time_step,
        config.cycles(),
        config.seed
    );

    let midnight = Utc.with_ymd_and_hms(2026, 2, 12, 0, 0, 0).single().unwrap_or_else(Utc::now);

    // Model in the loop
    let model = run_from(&mut GateController::new(), &config, midnight);

    // Software in the loop: same day through the exported functions
    let exported = run_from(&mut ExportedController::new(), &config, midnight);

    println!("\nModel run:");
    println!("  samples:      {}", model.samples.len());
    println!("  presses:      {}", model.presses());
    println!("  transitions:  {}", model.history.len());
    println!("  max position: {:.2} m", model.max_position());

    if model.samples == exported.samples {
        println!("\n✓ Exported controller matches the model sample for sample");
    } else {
        println!("\n✗ Exported controller diverged from the model");
    }

    model.write_csv(BufWriter::new(File::create(CSV_PATH)?))?;
    println!("\nTrace written to {}", CSV_PATH);

    println!("\n=== Simulation Complete ===");
    Ok(())
}

//! Closed-loop simulation of a controller driving the gate plant.
//!
//! The loop samples the limit switches from the plant, draws a random
//! button press (more likely during the morning and evening peaks), asks the
//! controller for a command and applies it to the plant. Any
//! [`MotorController`] can be plugged in, so the same day can be replayed
//! against the in-process model and against the exported C ABI and the two
//! traces compared.
//!
//! # Example
//!
//! ```rust
//! use gate_controller::controller::GateController;
//! use gate_controller::simulation::{run, SimulationConfig};
//!
//! let config = SimulationConfig::builder()
//!     .duration_hours(0.5)
//!     .idle_press_probability(0.001)
//!     .build()
//!     .unwrap();
//!
//! let report = run(&mut GateController::new(), &config);
//! assert_eq!(report.cycles, 18_000);
//! ```

mod config;
mod telemetry;

pub use config::{ConfigError, PeakWindow, SimulationConfig, SimulationConfigBuilder};
pub use telemetry::{Sample, SimulationReport, TelemetryError};

use crate::controller::MotorController;
use crate::core::{CycleInputs, StateHistory, StateTransition};
use crate::plant::GatePlant;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use uuid::Uuid;

/// Seeded source of button presses.
pub fn press_generator(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Run a full simulation with the simulated clock starting now.
pub fn run<C: MotorController + ?Sized>(
    controller: &mut C,
    config: &SimulationConfig,
) -> SimulationReport {
    run_from(controller, config, Utc::now())
}

/// Run a full simulation with an explicit simulated clock origin.
///
/// The controller is reset first. Samples depend only on the config and the
/// controller's behaviour, never on `started_at`.
pub fn run_from<C: MotorController + ?Sized>(
    controller: &mut C,
    config: &SimulationConfig,
    started_at: DateTime<Utc>,
) -> SimulationReport {
    let run_id = Uuid::new_v4();
    let cycles = config.cycles();
    info!(%run_id, cycles, seed = config.seed, "starting gate simulation");

    controller.reset();
    let mut plant = GatePlant::new(config.speed, config.travel, config.dead_zone);
    let mut presses = press_generator(config.seed);
    let mut history = StateHistory::new();
    let mut last_state = controller.observed_state();
    let mut samples = Vec::new();

    for cycle in 0..cycles {
        let seconds = cycle as f64 * config.time_step;
        let hour = seconds / 3600.0;

        let button = presses.gen::<f64>() < config.press_probability(hour);
        let inputs = CycleInputs::new(button, plant.at_open_limit(), plant.at_closed_limit());

        let command = controller.process(inputs);
        let position = plant.advance(command, config.time_step);

        if let (Some(from), Some(to)) = (last_state, controller.observed_state()) {
            if from != to {
                debug!(cycle, hour, from = %from, to = %to, position, "state change");
                history = history.record(StateTransition {
                    from,
                    to,
                    cycle,
                    timestamp: started_at + Duration::microseconds((seconds * 1e6) as i64),
                });
            }
            last_state = Some(to);
        }

        if button || command.is_moving() || cycle % config.sample_every == 0 {
            samples.push(Sample {
                hour,
                button,
                position,
                command,
            });
        }
    }

    let report = SimulationReport {
        run_id,
        started_at,
        cycles,
        samples,
        history,
    };

    info!(
        %run_id,
        samples = report.samples.len(),
        presses = report.presses(),
        transitions = report.history.len(),
        "gate simulation complete"
    );

    report
}

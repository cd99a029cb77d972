//! Gate controller: a single-button garage gate motor controller.
//!
//! The controller is a four-state ring (`Closed -> Opening -> Stopped ->
//! Closing -> Closed`) advanced by radio button pulses and overridden by the
//! two limit switches. Each control cycle it turns three booleans into a
//! motor command (`+1` open, `-1` close, `0` stop).
//!
//! # Modules
//!
//! - [`core`]: states, commands, inputs and transition history
//! - [`controller`]: the transition rule and [`GateController`]
//! - [`ffi`]: C ABI exports for foreign validation harnesses
//! - [`plant`]: physical gate model with gearing dead zone
//! - [`simulation`]: seeded day-long closed-loop runs and telemetry export
//!
//! # Example
//!
//! ```rust
//! use gate_controller::{CycleInputs, GateController, GateState, MotorCommand};
//!
//! let mut controller = GateController::new();
//!
//! // Pulse: start opening.
//! assert_eq!(controller.step(CycleInputs::press()), MotorCommand::Open);
//!
//! // Fully-open limit switch: lock open.
//! let command = controller.step(CycleInputs::new(false, true, false));
//! assert_eq!(command, MotorCommand::Stop);
//! assert_eq!(controller.state(), GateState::Stopped);
//!
//! // Without a pulse nothing changes.
//! assert_eq!(controller.step(CycleInputs::idle()), MotorCommand::Stop);
//! ```

pub mod controller;
pub mod core;
pub mod ffi;
pub mod plant;
pub mod simulation;

// Re-export commonly used types
pub use crate::controller::{GateController, MotorController};
pub use crate::core::{CycleInputs, GateState, MotorCommand, State, StateHistory, StateTransition};

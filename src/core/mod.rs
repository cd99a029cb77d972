//! Core gate controller types.
//!
//! This module contains the pure data model of the controller:
//! - The four-state ring via `GateState` and the `State` trait
//! - Motor commands and the per-cycle input snapshot
//! - Transition history tracking
//!
//! Nothing here performs I/O; the transition rule itself lives in
//! [`crate::controller`].

mod command;
mod error;
mod history;
mod inputs;
mod state;

pub use command::MotorCommand;
pub use error::ConversionError;
pub use history::{StateHistory, StateTransition};
pub use inputs::CycleInputs;
pub use state::{GateState, State};

//! The gate controller state machine.
//!
//! Each control cycle the controller applies, in order:
//!
//! 1. a button pulse advances the state one step around the ring
//!    `Closed -> Opening -> Stopped -> Closing -> Closed`;
//! 2. the open limit switch turns `Opening` into `Stopped`;
//! 3. the closed limit switch turns `Closing` into `Closed`;
//! 4. the final state selects the motor command.
//!
//! A pulse and a limit switch in the same cycle therefore resolve in favour
//! of the limit switch.

use crate::core::{CycleInputs, GateState, MotorCommand};
use tracing::{debug, trace};

/// Pure transition rule: next state and motor command for one cycle.
///
/// # Example
///
/// ```rust
/// use gate_controller::controller::transition;
/// use gate_controller::core::{CycleInputs, GateState, MotorCommand};
///
/// // Pulse while closed starts opening.
/// let (state, command) = transition(GateState::Closed, CycleInputs::press());
/// assert_eq!((state, command), (GateState::Opening, MotorCommand::Open));
///
/// // Open limit while opening locks the gate open.
/// let (state, command) = transition(state, CycleInputs::new(false, true, false));
/// assert_eq!((state, command), (GateState::Stopped, MotorCommand::Stop));
/// ```
pub const fn transition(state: GateState, inputs: CycleInputs) -> (GateState, MotorCommand) {
    let mut next = state;

    if inputs.button {
        next = next.advance();
    }

    if inputs.limit_open && matches!(next, GateState::Opening) {
        next = GateState::Stopped;
    }

    if inputs.limit_closed && matches!(next, GateState::Closing) {
        next = GateState::Closed;
    }

    (next, next.command())
}

/// Anything that turns a cycle's inputs into a motor command.
///
/// The simulation drives controllers through this trait so the same loop
/// can exercise the in-process model and the exported C ABI.
pub trait MotorController {
    /// Run one control cycle.
    fn process(&mut self, inputs: CycleInputs) -> MotorCommand;

    /// Return to the power-on state.
    fn reset(&mut self);

    /// Current state, when the implementation can expose it.
    fn observed_state(&self) -> Option<GateState> {
        None
    }
}

/// Single-button gate controller owning one [`GateState`].
///
/// # Example
///
/// ```rust
/// use gate_controller::controller::GateController;
/// use gate_controller::core::{CycleInputs, GateState, MotorCommand};
///
/// let mut controller = GateController::new();
/// assert_eq!(controller.step(CycleInputs::press()), MotorCommand::Open);
/// assert_eq!(controller.step(CycleInputs::press()), MotorCommand::Stop);
/// assert_eq!(controller.step(CycleInputs::press()), MotorCommand::Close);
/// assert_eq!(controller.step_raw(false, false, true), 0);
/// assert_eq!(controller.state(), GateState::Closed);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateController {
    state: GateState,
}

impl GateController {
    /// Create a controller in the `Closed` state.
    pub const fn new() -> Self {
        Self {
            state: GateState::Closed,
        }
    }

    /// Current state (pure)
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Execute one control cycle and return the motor command.
    pub fn step(&mut self, inputs: CycleInputs) -> MotorCommand {
        let (next, command) = transition(self.state, inputs);

        if next != self.state {
            trace!(
                from = self.state.ordinal(),
                to = next.ordinal(),
                button = inputs.button,
                limit_open = inputs.limit_open,
                limit_closed = inputs.limit_closed,
                "gate state changed"
            );
        }

        self.state = next;
        command
    }

    /// Same as [`step`](Self::step) using the raw types of the C ABI.
    pub fn step_raw(&mut self, button: bool, limit_open: bool, limit_closed: bool) -> i32 {
        self.step(CycleInputs::new(button, limit_open, limit_closed))
            .as_i32()
    }

    /// Unconditionally return to `Closed`.
    pub fn reset(&mut self) {
        debug!(from = self.state.ordinal(), "gate controller reset");
        self.state = GateState::Closed;
    }
}

impl MotorController for GateController {
    fn process(&mut self, inputs: CycleInputs) -> MotorCommand {
        self.step(inputs)
    }

    fn reset(&mut self) {
        GateController::reset(self);
    }

    fn observed_state(&self) -> Option<GateState> {
        Some(self.state)
    }
}

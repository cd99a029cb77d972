//! C ABI for foreign validation harnesses.
//!
//! Two flavours are exported:
//!
//! - a process-wide controller driven by [`gate_controller_step`] and
//!   [`gate_controller_reset`], for harnesses that load the library and
//!   simulate a single gate;
//! - opaque handles created by [`gate_controller_create`], one per gate.
//!
//! Only `bool`, `i32` and an opaque pointer cross the boundary. Nothing in
//! here panics.

use crate::controller::{GateController, MotorController};
use crate::core::{CycleInputs, GateState, MotorCommand};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

static GLOBAL_CONTROLLER: Mutex<GateController> = Mutex::new(GateController::new());

fn global() -> MutexGuard<'static, GateController> {
    GLOBAL_CONTROLLER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Run one control cycle on the process-wide controller.
///
/// Returns `1` (open), `-1` (close) or `0` (stop).
#[no_mangle]
pub extern "C" fn gate_controller_step(button: bool, limit_open: bool, limit_closed: bool) -> i32 {
    global().step_raw(button, limit_open, limit_closed)
}

/// Reset the process-wide controller to `Closed`.
#[no_mangle]
pub extern "C" fn gate_controller_reset() {
    global().reset();
}

/// Ordinal of the process-wide controller's state.
#[no_mangle]
pub extern "C" fn gate_controller_state() -> i32 {
    i32::from(global().state())
}

/// Allocate an independent controller in the `Closed` state.
///
/// The handle must be released with [`gate_controller_destroy`].
#[no_mangle]
pub extern "C" fn gate_controller_create() -> *mut GateController {
    Box::into_raw(Box::new(GateController::new()))
}

/// Release a handle obtained from [`gate_controller_create`]. Null is ignored.
///
/// # Safety
///
/// `handle` must be null or a pointer returned by [`gate_controller_create`]
/// that has not been destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn gate_controller_destroy(handle: *mut GateController) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
}

/// Run one control cycle on a handle. A null handle yields `0`.
///
/// # Safety
///
/// `handle` must be null or a live pointer returned by
/// [`gate_controller_create`], not used concurrently from another thread.
#[no_mangle]
pub unsafe extern "C" fn gate_controller_step_handle(
    handle: *mut GateController,
    button: bool,
    limit_open: bool,
    limit_closed: bool,
) -> i32 {
    match handle.as_mut() {
        Some(controller) => controller.step_raw(button, limit_open, limit_closed),
        None => {
            warn!("step called with a null gate controller handle");
            MotorCommand::Stop.as_i32()
        }
    }
}

/// Reset a handle to `Closed`. Null is ignored.
///
/// # Safety
///
/// Same contract as [`gate_controller_step_handle`].
#[no_mangle]
pub unsafe extern "C" fn gate_controller_reset_handle(handle: *mut GateController) {
    if let Some(controller) = handle.as_mut() {
        controller.reset();
    }
}

/// Controller that is only reachable through the exported functions.
///
/// Lets the simulation validate the C ABI against the in-process model the
/// same way a foreign harness would: booleans in, an integer out, no access
/// to the state.
#[derive(Debug)]
pub struct ExportedController {
    handle: *mut GateController,
}

impl ExportedController {
    /// Allocate a fresh handle in the `Closed` state.
    pub fn new() -> Self {
        Self {
            handle: gate_controller_create(),
        }
    }
}

impl Default for ExportedController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorController for ExportedController {
    fn process(&mut self, inputs: CycleInputs) -> MotorCommand {
        // SAFETY: the handle is created in `new`, owned exclusively by `self`
        // and only released in `drop`.
        let raw = unsafe {
            gate_controller_step_handle(
                self.handle,
                inputs.button,
                inputs.limit_open,
                inputs.limit_closed,
            )
        };
        MotorCommand::try_from(raw).unwrap_or_else(|err| {
            warn!(%err, "exported controller returned an unknown command");
            MotorCommand::Stop
        })
    }

    fn reset(&mut self) {
        // SAFETY: see `process`.
        unsafe { gate_controller_reset_handle(self.handle) }
    }
}

impl Drop for ExportedController {
    fn drop(&mut self) {
        // SAFETY: see `process`; the handle is nulled so it cannot be freed twice.
        unsafe { gate_controller_destroy(self.handle) };
        self.handle = ptr::null_mut();
    }
}

/// Decode the process-wide state ordinal, for harness assertions.
pub fn global_state() -> GateState {
    GateState::try_from(gate_controller_state()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GateState;

    // The process-wide controller is shared, so every assertion against it
    // lives in this single test.
    #[test]
    fn global_controller_follows_the_cycle() {
        gate_controller_reset();
        assert_eq!(global_state(), GateState::Closed);

        assert_eq!(gate_controller_step(true, false, false), 1);
        assert_eq!(gate_controller_step(false, true, false), 0);
        assert_eq!(global_state(), GateState::Stopped);

        assert_eq!(gate_controller_step(true, false, false), -1);
        assert_eq!(gate_controller_state(), 3);
        assert_eq!(gate_controller_step(false, false, true), 0);
        assert_eq!(global_state(), GateState::Closed);

        gate_controller_step(true, false, false);
        gate_controller_reset();
        assert_eq!(gate_controller_step(false, false, false), 0);
        assert_eq!(global_state(), GateState::Closed);

        // A thread panicking while holding the lock poisons it; the exports
        // keep working on the recovered controller.
        let poisoner = std::thread::spawn(|| {
            let mut controller = global();
            controller.step(CycleInputs::press());
            panic!("panic while holding the global controller");
        });
        assert!(poisoner.join().is_err());
        assert!(GLOBAL_CONTROLLER.is_poisoned());

        assert_eq!(global_state(), GateState::Opening);
        gate_controller_reset();
        assert_eq!(global_state(), GateState::Closed);
        assert_eq!(gate_controller_step(true, false, false), 1);
        gate_controller_reset();
        assert_eq!(global_state(), GateState::Closed);
    }

    #[test]
    fn handles_are_independent() {
        let a = gate_controller_create();
        let b = gate_controller_create();

        unsafe {
            assert_eq!(gate_controller_step_handle(a, true, false, false), 1);
            assert_eq!(gate_controller_step_handle(b, false, false, false), 0);
            assert_eq!((*a).state(), GateState::Opening);
            assert_eq!((*b).state(), GateState::Closed);

            gate_controller_reset_handle(a);
            assert_eq!((*a).state(), GateState::Closed);

            gate_controller_destroy(a);
            gate_controller_destroy(b);
        }
    }

    #[test]
    fn null_handles_are_tolerated() {
        unsafe {
            assert_eq!(
                gate_controller_step_handle(ptr::null_mut(), true, false, false),
                0
            );
            gate_controller_reset_handle(ptr::null_mut());
            gate_controller_destroy(ptr::null_mut());
        }
    }

    #[test]
    fn exported_controller_matches_model() {
        let mut exported = ExportedController::new();
        let mut model = GateController::new();

        let script = [
            CycleInputs::press(),
            CycleInputs::idle(),
            CycleInputs::new(false, true, false),
            CycleInputs::press(),
            CycleInputs::new(true, true, true),
            CycleInputs::press(),
            CycleInputs::new(false, false, true),
        ];

        for inputs in script {
            assert_eq!(exported.process(inputs), model.step(inputs));
        }
        assert_eq!(exported.observed_state(), None);
    }
}

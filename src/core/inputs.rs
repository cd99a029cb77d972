//! Input snapshot sampled at the start of a control cycle.

use serde::{Deserialize, Serialize};

/// The three digital inputs the controller sees each cycle.
///
/// Every combination is valid, including both limit switches engaged at
/// once.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CycleInputs {
    /// A radio/remote pulse was received this cycle.
    pub button: bool,
    /// The fully-open limit switch is engaged.
    pub limit_open: bool,
    /// The fully-closed limit switch is engaged.
    pub limit_closed: bool,
}

impl CycleInputs {
    /// Snapshot of the button and both limit switches.
    pub const fn new(button: bool, limit_open: bool, limit_closed: bool) -> Self {
        Self {
            button,
            limit_open,
            limit_closed,
        }
    }

    /// No pulse, no limit switch.
    pub const fn idle() -> Self {
        Self::new(false, false, false)
    }

    /// A lone button pulse.
    pub const fn press() -> Self {
        Self::new(true, false, false)
    }

    /// All eight input combinations.
    pub fn all() -> impl Iterator<Item = CycleInputs> {
        (0u8..8).map(|bits| Self::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0))
    }
}

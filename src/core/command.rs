//! Motor direction command emitted once per control cycle.

use super::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction sent to the gate motor.
///
/// Serialized as the raw integer (`-1`, `0`, `1`) so that exports line up
/// with what crosses the C ABI.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum MotorCommand {
    /// Drive the motor towards the closed end.
    Close = -1,
    /// Motor stopped.
    #[default]
    Stop = 0,
    /// Drive the motor towards the open end.
    Open = 1,
}

impl MotorCommand {
    /// Whether the motor is powered in either direction.
    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::Stop)
    }

    /// Raw integer value as exchanged over the C ABI.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for MotorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

impl From<MotorCommand> for i32 {
    fn from(command: MotorCommand) -> Self {
        command.as_i32()
    }
}

impl TryFrom<i32> for MotorCommand {
    type Error = ConversionError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(Self::Close),
            0 => Ok(Self::Stop),
            1 => Ok(Self::Open),
            other => Err(ConversionError::InvalidCommand(other)),
        }
    }
}

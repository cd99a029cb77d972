//! Gate states and the `State` trait they implement.
//!
//! The controller cycles through four states arranged as a ring. The
//! ordinals are fixed and form part of the external contract: foreign
//! harnesses observe them through the C ABI and telemetry exports.

use super::command::MotorCommand;
use super::error::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure. States are plain values describing the current
/// position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transition history
/// - `PartialEq`: states must be comparable to detect changes
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states appear in exported telemetry
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Position of the gate controller in its single-button cycle.
///
/// # Example
///
/// ```rust
/// use gate_controller::core::{GateState, MotorCommand};
///
/// let state = GateState::Closed.advance();
/// assert_eq!(state, GateState::Opening);
/// assert_eq!(state.command(), MotorCommand::Open);
/// assert_eq!(GateState::Closing.advance(), GateState::Closed);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum GateState {
    /// Gate at rest, fully closed (or never opened).
    #[default]
    Closed = 0,
    /// Motor driving the gate open.
    Opening = 1,
    /// Gate at rest somewhere along its travel, or locked fully open.
    Stopped = 2,
    /// Motor driving the gate closed.
    Closing = 3,
}

impl GateState {
    /// Number of states in the ring.
    pub const COUNT: u8 = 4;

    /// All states in ring order.
    pub const ALL: [GateState; 4] = [
        GateState::Closed,
        GateState::Opening,
        GateState::Stopped,
        GateState::Closing,
    ];

    /// Ordinal of this state (0..=3).
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a state by ordinal.
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Closed),
            1 => Some(Self::Opening),
            2 => Some(Self::Stopped),
            3 => Some(Self::Closing),
            _ => None,
        }
    }

    /// Successor in the ring: `(ordinal + 1) mod 4`.
    pub const fn advance(self) -> Self {
        match self {
            Self::Closed => Self::Opening,
            Self::Opening => Self::Stopped,
            Self::Stopped => Self::Closing,
            Self::Closing => Self::Closed,
        }
    }

    /// Motor command emitted while in this state.
    pub const fn command(self) -> MotorCommand {
        match self {
            Self::Opening => MotorCommand::Open,
            Self::Closing => MotorCommand::Close,
            Self::Closed | Self::Stopped => MotorCommand::Stop,
        }
    }
}

impl State for GateState {
    fn name(&self) -> &str {
        match self {
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Stopped => "Stopped",
            Self::Closing => "Closing",
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<GateState> for i32 {
    fn from(state: GateState) -> Self {
        i32::from(state.ordinal())
    }
}

impl TryFrom<i32> for GateState {
    type Error = ConversionError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .ok()
            .and_then(Self::from_ordinal)
            .ok_or(ConversionError::InvalidState(raw))
    }
}

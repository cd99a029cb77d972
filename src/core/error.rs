//! Errors raised when decoding raw integers into core types.

use thiserror::Error;

/// Raw value does not name a state or command.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid gate state ordinal {0}, expected 0..=3")]
    InvalidState(i32),

    #[error("Invalid motor command {0}, expected -1, 0 or 1")]
    InvalidCommand(i32),
}

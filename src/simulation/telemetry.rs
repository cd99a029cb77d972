//! Telemetry captured during a simulation run and its export formats.

use crate::core::{GateState, MotorCommand, StateHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while exporting or importing telemetry
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to write telemetry: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// One telemetry row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulated time of day, hours since start
    pub hour: f64,
    /// A press happened this cycle
    pub button: bool,
    /// Gate position after the cycle, metres
    pub position: f64,
    pub command: MotorCommand,
}

/// Outcome of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    /// Simulated clock origin
    pub started_at: DateTime<Utc>,
    /// Control cycles executed
    pub cycles: u64,
    pub samples: Vec<Sample>,
    /// State changes, empty when the controller hides its state
    pub history: StateHistory<GateState>,
}

impl SimulationReport {
    /// Number of sampled cycles with a button press.
    pub fn presses(&self) -> usize {
        self.samples.iter().filter(|s| s.button).count()
    }

    /// Highest gate position seen in the samples.
    pub fn max_position(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.position)
            .fold(0.0, f64::max)
    }

    /// Write the samples as CSV with a `hour,button,position,command` header.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<(), TelemetryError> {
        writeln!(writer, "hour,button,position,command")?;
        for sample in &self.samples {
            writeln!(
                writer,
                "{},{},{},{}",
                sample.hour, sample.button, sample.position, sample.command
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Pretty-printed JSON for inspection.
    pub fn to_json(&self) -> Result<String, TelemetryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TelemetryError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a report produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TelemetryError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

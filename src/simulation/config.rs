//! Simulation parameters and their builder.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised while building or loading a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Gate speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),

    #[error("Track length must be positive and finite, got {0}")]
    InvalidTravel(f64),

    #[error("Dead zone must be non-negative and finite, got {0}")]
    InvalidDeadZone(f64),

    #[error("Time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("Duration must be non-negative and finite, got {0} hours")]
    InvalidDuration(f64),

    #[error("Probability '{name}' must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Peak window must satisfy start < end, got ({start}, {end})")]
    InvalidPeakWindow { start: f64, end: f64 },

    #[error("Sample interval must be at least one cycle")]
    ZeroSampleInterval,

    #[error("Failed to parse simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Hour-of-day interval, bounds excluded, in which the button is pressed
/// more often.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: f64,
    pub end: f64,
}

impl PeakWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: f64) -> bool {
        self.start < hour && hour < self.end
    }
}

/// Everything the day-long simulation loop needs.
///
/// # Example
///
/// ```rust
/// use gate_controller::simulation::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .duration_hours(1.0)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.cycles(), 36_000);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gate speed, metres per second
    pub speed: f64,
    /// Track length, metres
    pub travel: f64,
    /// Gearing slack taken up after a direction change, metres
    pub dead_zone: f64,
    /// Control cycle period, seconds
    pub time_step: f64,
    /// Simulated span, hours
    pub duration_hours: f64,
    /// Seed for the button-press generator
    pub seed: u64,
    /// Per-cycle press probability outside peak windows
    pub idle_press_probability: f64,
    /// Per-cycle press probability inside peak windows
    pub peak_press_probability: f64,
    pub peak_windows: Vec<PeakWindow>,
    /// Emit a sample every this many cycles even when nothing happens
    pub sample_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            travel: 5.0,
            dead_zone: 0.2,
            time_step: 0.1,
            duration_hours: 24.0,
            seed: 42,
            idle_press_probability: 0.00001,
            peak_press_probability: 0.005,
            peak_windows: vec![PeakWindow::new(7.9, 8.1), PeakWindow::new(17.9, 18.1)],
            sample_every: 100,
        }
    }
}

impl SimulationConfig {
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if !(self.travel.is_finite() && self.travel > 0.0) {
            return Err(ConfigError::InvalidTravel(self.travel));
        }
        if !(self.dead_zone.is_finite() && self.dead_zone >= 0.0) {
            return Err(ConfigError::InvalidDeadZone(self.dead_zone));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        if !(self.duration_hours.is_finite() && self.duration_hours >= 0.0) {
            return Err(ConfigError::InvalidDuration(self.duration_hours));
        }
        check_probability("idle_press_probability", self.idle_press_probability)?;
        check_probability("peak_press_probability", self.peak_press_probability)?;
        if let Some(window) = self
            .peak_windows
            .iter()
            .find(|w| w.start.partial_cmp(&w.end) != Some(Ordering::Less))
        {
            return Err(ConfigError::InvalidPeakWindow {
                start: window.start,
                end: window.end,
            });
        }
        if self.sample_every == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(())
    }

    /// Number of control cycles in the simulated span (truncated).
    pub fn cycles(&self) -> u64 {
        (self.duration_hours * 3600.0 / self.time_step) as u64
    }

    /// Press probability at a given hour of the day.
    pub fn press_probability(&self, hour: f64) -> f64 {
        if self.peak_windows.iter().any(|w| w.contains(hour)) {
            self.peak_press_probability
        } else {
            self.idle_press_probability
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

/// Builder for [`SimulationConfig`], starting from the defaults.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate speed in metres per second.
    pub fn speed(mut self, speed: f64) -> Self {
        self.config.speed = speed;
        self
    }

    /// Track length in metres.
    pub fn travel(mut self, travel: f64) -> Self {
        self.config.travel = travel;
        self
    }

    /// Gearing slack in metres.
    pub fn dead_zone(mut self, dead_zone: f64) -> Self {
        self.config.dead_zone = dead_zone;
        self
    }

    /// Control cycle period in seconds.
    pub fn time_step(mut self, seconds: f64) -> Self {
        self.config.time_step = seconds;
        self
    }

    /// Simulated span in hours.
    pub fn duration_hours(mut self, hours: f64) -> Self {
        self.config.duration_hours = hours;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Per-cycle press probability outside the peak windows.
    pub fn idle_press_probability(mut self, probability: f64) -> Self {
        self.config.idle_press_probability = probability;
        self
    }

    /// Per-cycle press probability inside a peak window.
    pub fn peak_press_probability(mut self, probability: f64) -> Self {
        self.config.peak_press_probability = probability;
        self
    }

    /// Replace the peak windows.
    pub fn peak_windows(mut self, windows: Vec<PeakWindow>) -> Self {
        self.config.peak_windows = windows;
        self
    }

    /// Add one more peak window.
    pub fn peak_window(mut self, start: f64, end: f64) -> Self {
        self.config.peak_windows.push(PeakWindow::new(start, end));
        self
    }

    /// Keep an idle sample every `cycles` cycles.
    pub fn sample_every(mut self, cycles: u64) -> Self {
        self.config.sample_every = cycles;
        self
    }

    /// Build the config.
    /// Returns an error if any parameter is out of range.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cycles(), 864_000);
    }

    #[test]
    fn builder_validates_speed() {
        let result = SimulationConfig::builder().speed(0.0).build();
        assert!(matches!(result, Err(ConfigError::InvalidSpeed(_))));

        let result = SimulationConfig::builder().speed(f64::NAN).build();
        assert!(matches!(result, Err(ConfigError::InvalidSpeed(_))));
    }

    #[test]
    fn builder_validates_geometry() {
        assert!(matches!(
            SimulationConfig::builder().travel(-1.0).build(),
            Err(ConfigError::InvalidTravel(_))
        ));
        assert!(matches!(
            SimulationConfig::builder().dead_zone(-0.1).build(),
            Err(ConfigError::InvalidDeadZone(_))
        ));
    }

    #[test]
    fn builder_validates_timing() {
        assert!(matches!(
            SimulationConfig::builder().time_step(0.0).build(),
            Err(ConfigError::InvalidTimeStep(_))
        ));
        assert!(matches!(
            SimulationConfig::builder().duration_hours(-2.0).build(),
            Err(ConfigError::InvalidDuration(_))
        ));
        assert!(matches!(
            SimulationConfig::builder().sample_every(0).build(),
            Err(ConfigError::ZeroSampleInterval)
        ));
    }

    #[test]
    fn builder_validates_probabilities() {
        let result = SimulationConfig::builder().peak_press_probability(1.5).build();
        match result {
            Err(ConfigError::InvalidProbability { name, value }) => {
                assert_eq!(name, "peak_press_probability");
                assert_eq!(value, 1.5);
            }
            other => panic!("Expected InvalidProbability, got {:?}", other),
        }
    }

    #[test]
    fn builder_validates_peak_windows() {
        let result = SimulationConfig::builder().peak_window(9.0, 9.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPeakWindow { .. })
        ));

        for (start, end) in [(f64::NAN, 9.0), (9.0, f64::NAN), (10.0, 9.0)] {
            let result = SimulationConfig::builder().peak_window(start, end).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidPeakWindow { .. })
            ));
        }

        assert!(SimulationConfig::builder().peak_window(9.0, 9.5).build().is_ok());
    }

    #[test]
    fn peak_window_bounds_are_exclusive() {
        let config = SimulationConfig::default();
        assert_eq!(config.press_probability(8.0), 0.005);
        assert_eq!(config.press_probability(18.05), 0.005);
        assert_eq!(config.press_probability(12.0), 0.00001);

        let window = PeakWindow::new(1.0, 2.0);
        assert!(!window.contains(1.0));
        assert!(!window.contains(2.0));
        assert!(window.contains(1.5));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = SimulationConfig::from_json(r#"{ "seed": 7, "duration_hours": 2.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.duration_hours, 2.0);
        assert_eq!(config.speed, 0.5);
        assert_eq!(config.peak_windows.len(), 2);
    }

    #[test]
    fn json_is_validated() {
        let result = SimulationConfig::from_json(r#"{ "time_step": -0.1 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidTimeStep(_))));

        let result = SimulationConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_serializes_correctly() {
        let config = SimulationConfig::builder().seed(99).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
    }
}

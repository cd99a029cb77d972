//! Physical model of the gate driven by the controller.
//!
//! The gate slides along a straight track at constant speed. After the motor
//! starts in a new direction, the gearing slack (dead zone) has to be taken
//! up before the gate actually moves.

use crate::core::MotorCommand;
use serde::{Deserialize, Serialize};

/// Gate position on its track plus the motor's gearing slack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GatePlant {
    position: f64,
    slack: f64,
    direction: MotorCommand,
    speed: f64,
    travel: f64,
    dead_zone: f64,
}

impl GatePlant {
    /// Gate at the closed end with no slack taken up.
    ///
    /// `speed` in metres per second, `travel` and `dead_zone` in metres.
    pub fn new(speed: f64, travel: f64, dead_zone: f64) -> Self {
        Self {
            position: 0.0,
            slack: 0.0,
            direction: MotorCommand::Stop,
            speed,
            travel,
            dead_zone,
        }
    }

    /// Apply `command` for `dt` seconds and return the new position.
    ///
    /// The slack counter restarts only when the motor runs in a direction
    /// different from the last one; stopping does not clear it.
    pub fn advance(&mut self, command: MotorCommand, dt: f64) -> f64 {
        if command.is_moving() && command != self.direction {
            self.slack = 0.0;
            self.direction = command;
        }

        if command.is_moving() && self.slack < self.dead_zone {
            self.slack += (self.speed * dt).abs();
            return self.position;
        }

        match command {
            MotorCommand::Open => {
                self.position = (self.position + self.speed * dt).min(self.travel);
            }
            MotorCommand::Close => {
                self.position = (self.position - self.speed * dt).max(0.0);
            }
            MotorCommand::Stop => {}
        }

        self.position
    }

    /// Distance from the closed end, in metres.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Fully-open limit switch.
    pub fn at_open_limit(&self) -> bool {
        self.position >= self.travel
    }

    /// Fully-closed limit switch.
    pub fn at_closed_limit(&self) -> bool {
        self.position <= 0.0
    }

    /// Last direction the motor ran in, `Stop` before the first move.
    pub fn direction(&self) -> MotorCommand {
        self.direction
    }
}

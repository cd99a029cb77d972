//! State transition history tracking.
//!
//! A log of the state changes a controller went through, indexed by the
//! control cycle in which each change happened.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use gate_controller::core::{GateState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: GateState::Closed,
///     to: GateState::Opening,
///     cycle: 42,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.cycle, 42);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Index of the control cycle that produced the change
    pub cycle: u64,
    /// When the transition occurred (wall clock or simulated clock)
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// # Example
///
/// ```rust
/// use gate_controller::core::{GateState, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: GateState::Closed,
///         to: GateState::Opening,
///         cycle: 10,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: GateState::Opening,
///         to: GateState::Stopped,
///         cycle: 110,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&GateState::Closed, &GateState::Opening, &GateState::Stopped]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning the extended history.
    pub fn record(mut self, transition: StateTransition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: initial state, then
    /// the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in recording order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// True when no transition has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GateState;

    fn transition(from: GateState, to: GateState, cycle: u64) -> StateTransition<GateState> {
        StateTransition {
            from,
            to,
            cycle,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<GateState> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_adds_transition() {
        let history =
            StateHistory::new().record(transition(GateState::Closed, GateState::Opening, 1));

        assert_eq!(history.len(), 1);
        assert_eq!(history.transitions()[0].cycle, 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(GateState::Closed, GateState::Opening, 3))
            .record(transition(GateState::Opening, GateState::Stopped, 90))
            .record(transition(GateState::Stopped, GateState::Closing, 200));

        let path = history.get_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], &GateState::Closed);
        assert_eq!(path[1], &GateState::Opening);
        assert_eq!(path[2], &GateState::Stopped);
        assert_eq!(path[3], &GateState::Closing);
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let history = StateHistory::new()
            .record(StateTransition {
                from: GateState::Closed,
                to: GateState::Opening,
                cycle: 0,
                timestamp: start,
            })
            .record(StateTransition {
                from: GateState::Opening,
                to: GateState::Stopped,
                cycle: 100,
                timestamp: start + chrono::Duration::seconds(10),
            });

        assert_eq!(history.duration(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history =
            StateHistory::new().record(transition(GateState::Closed, GateState::Opening, 0));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StateHistory::new().record(transition(GateState::Closing, GateState::Closed, 7));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<GateState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}

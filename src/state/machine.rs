//! Finite-state machine governing a play session.

use serde::Serialize;
use thiserror::Error;

/// Phase the session is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// No run in progress; the next trigger arms the game.
    Idle,
    /// Pointer is rotating; triggers are hit-tested.
    Playing,
    /// A miss ended the run; the result overlay is showing.
    Busted,
}

/// Events applied to the state machine.
///
/// The raw input is a single trigger action; [`crate::services::game_service`]
/// classifies each press into one of these from the current phase before
/// applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Arm press from idle. Exempt from hit testing.
    Arm,
    /// Trigger pressed while the pointer overlapped the target.
    Hit,
    /// Trigger pressed clear of the target.
    Miss,
    /// Trigger pressed on the result overlay; dismisses it and re-arms in
    /// the same press.
    Acknowledge,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// Phase the machine was in when the invalid event was received.
    pub from: SessionPhase,
    /// Event that cannot be applied from that phase.
    pub event: SessionEvent,
}

/// State machine implementing the Idle/Playing/Busted flow.
///
/// Owns only the phase and a transition counter; streak, direction, and
/// target placement live in [`crate::state::Session`].
#[derive(Debug, Clone)]
pub struct SessionMachine {
    phase: SessionPhase,
    version: usize,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            version: 0,
        }
    }
}

impl SessionMachine {
    /// Create a new state machine initialised in the idle phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Apply an event, moving the machine to the next phase.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionPhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (SessionPhase::Idle, SessionEvent::Arm) => SessionPhase::Playing,
            (SessionPhase::Playing, SessionEvent::Hit) => SessionPhase::Playing,
            (SessionPhase::Playing, SessionEvent::Miss) => SessionPhase::Busted,
            // One press both dismisses the overlay and starts the next run.
            (SessionPhase::Busted, SessionEvent::Acknowledge) => SessionPhase::Playing,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        self.phase = next;
        self.version += 1;
        Ok(next)
    }
}

//! Session state owned by the game engine.

/// Streak to rotation-duration mapping.
pub mod difficulty;
/// Target placement and the overlap test.
pub mod geometry;
/// Trigger input debouncing.
pub mod input;
/// The Idle/Playing/Busted state machine.
pub mod machine;

use serde::Serialize;

pub use machine::{InvalidTransition, SessionEvent, SessionMachine, SessionPhase};

/// Sense of the pointer's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Angle increases over time.
    Clockwise,
    /// Angle decreases over time.
    CounterClockwise,
}

impl Direction {
    /// The opposite sense; the direction flips on every successful hit.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Mutable per-run data, owned exclusively by the game service.
///
/// Reset to a zero streak after a miss is acknowledged; never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    /// Consecutive hits in the current run; equals the run's score.
    pub streak: u32,
    /// Current rotation sense.
    pub direction: Direction,
    /// Angle of the placed target zone, whole degrees in `[0, 360)`.
    pub target_angle_deg: u16,
    /// Final score of the last ended run, shown on the Busted overlay.
    pub last_result: Option<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            streak: 0,
            // The first rotation runs counter-clockwise; each hit flips it.
            direction: Direction::CounterClockwise,
            target_angle_deg: 0,
            last_result: None,
        }
    }
}

impl Session {
    /// Fresh session with no run in progress.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipping_twice_restores_the_direction() {
        let initial = Direction::CounterClockwise;
        assert_eq!(initial.flipped(), Direction::Clockwise);
        assert_eq!(initial.flipped().flipped(), initial);
    }

    #[test]
    fn new_session_is_zeroed() {
        let session = Session::new();
        assert_eq!(session.streak, 0);
        assert_eq!(session.last_result, None);
    }
}

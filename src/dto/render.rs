//! Snapshot handed to a view per frame or transition.

use serde::Serialize;

use crate::state::{Direction, SessionPhase};

/// One row of the sorted leaderboard as the view should print it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// Player display name; may be empty after a rename.
    pub name: String,
    /// Persisted personal best.
    pub high_score: u32,
}

/// Everything a view needs to render the game.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    /// Current session phase.
    pub phase: SessionPhase,
    /// Streak of the run in progress.
    pub streak: u32,
    /// Current rotation sense.
    pub direction: Direction,
    /// Pointer angle in degrees, 0 pointing up.
    pub pointer_angle_deg: f32,
    /// Target zone center as an offset from the track center.
    pub target_offset: (f32, f32),
    /// Final score of the last run, present while the Busted overlay shows.
    pub overlay_score: Option<u32>,
    /// Leaderboard snapshot, sorted descending by high score.
    pub leaderboard: Vec<LeaderboardRow>,
}

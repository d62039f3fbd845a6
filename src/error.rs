//! Failure taxonomy for the score synchronization boundary.
//!
//! Every variant is caught inside [`crate::services::score_sync`] and
//! surfaced as a log line; none of them ever reaches the game state machine.
//! Leaderboard unavailability must never block or crash gameplay.

use thiserror::Error;

use crate::dao::storage::StorageError;
use crate::services::identity::IdentityError;

/// Errors raised by score synchronization operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Anonymous authentication failed. Fatal to persistence for this
    /// session; the game stays playable with an in-memory guest profile.
    #[error("anonymous identity could not be established")]
    Identity(#[source] IdentityError),
    /// A leaderboard fetch failed; the previous (possibly empty) snapshot
    /// is kept.
    #[error("leaderboard fetch failed")]
    RemoteRead(#[source] StorageError),
    /// A score or name update failed. The optimistic local change is not
    /// rolled back, so local display may diverge from the store until the
    /// next successful fetch.
    #[error("remote record update failed")]
    RemoteWrite(#[source] StorageError),
    /// First-time profile creation failed; gameplay proceeds with a guest
    /// profile held only in memory.
    #[error("player record creation failed")]
    RecordCreate(#[source] StorageError),
}

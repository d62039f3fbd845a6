//! Abstraction over the leaderboard's document store.

#[cfg(feature = "couch-store")]
pub mod couchdb;
/// In-process store used for tests and degraded mode.
pub mod memory;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::PlayerEntity;
use crate::dao::storage::StorageResult;

/// Operations the leaderboard backend must provide: get-by-id,
/// create/overwrite-by-id, per-field updates, and a full collection scan.
pub trait PlayerStore: Send + Sync {
    /// Fetch one player record by identity.
    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>>;
    /// Create or overwrite a player record.
    fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite only the high score of an existing record.
    fn update_high_score(&self, id: Uuid, high_score: u32) -> BoxFuture<'static, StorageResult<()>>;
    /// Overwrite only the display name of an existing record.
    fn update_name(&self, id: Uuid, name: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch every player record, in whatever order the backend returns.
    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>>;
    /// Cheap reachability probe.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

//! In-memory [`PlayerStore`] backing tests and degraded mode.
//!
//! When the remote store is unreachable the game stays playable against this
//! store; nothing written here survives the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::PlayerEntity;
use crate::dao::player_store::PlayerStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Process-local player store with last-writer-wins semantics, matching the
/// remote backend's concurrency model.
#[derive(Clone, Default)]
pub struct MemoryPlayerStore {
    players: Arc<Mutex<HashMap<Uuid, PlayerEntity>>>,
}

impl MemoryPlayerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, PlayerEntity>> {
        // Lock poisoning cannot outlive a test run; propagate the inner map.
        self.players.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PlayerStore for MemoryPlayerStore {
    fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().get(&id).cloned()) })
    }

    fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.lock().insert(player.id, player);
            Ok(())
        })
    }

    fn update_high_score(&self, id: Uuid, high_score: u32) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut players = store.lock();
            let player = players.get_mut(&id).ok_or(StorageError::NotFound { id })?;
            player.high_score = high_score;
            Ok(())
        })
    }

    fn update_name(&self, id: Uuid, name: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut players = store.lock();
            let player = players.get_mut(&id).ok_or(StorageError::NotFound { id })?;
            player.name = name;
            Ok(())
        })
    }

    fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().values().cloned().collect()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_round_trip() {
        let store = MemoryPlayerStore::new();
        let player = PlayerEntity::guest(Uuid::new_v4());
        store.save_player(player.clone()).await.unwrap();

        let found = store.find_player(player.id).await.unwrap();
        assert_eq!(found, Some(player));
    }

    #[tokio::test]
    async fn missing_player_is_none_not_an_error() {
        let store = MemoryPlayerStore::new();
        assert_eq!(store.find_player(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn field_updates_are_visible_in_list() {
        let store = MemoryPlayerStore::new();
        let id = Uuid::new_v4();
        store.save_player(PlayerEntity::guest(id)).await.unwrap();

        store.update_high_score(id, 12).await.unwrap();
        store.update_name(id, "ringo".to_string()).await.unwrap();

        let players = store.list_players().await.unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].high_score, 12);
        assert_eq!(players[0].name, "ringo");
    }

    #[tokio::test]
    async fn updating_a_missing_record_reports_not_found() {
        let store = MemoryPlayerStore::new();
        let id = Uuid::new_v4();
        let err = store.update_high_score(id, 3).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { id: missing } if missing == id));
    }

    #[tokio::test]
    async fn last_writer_wins_on_overwrite() {
        let store = MemoryPlayerStore::new();
        let id = Uuid::new_v4();
        store.save_player(PlayerEntity::guest(id)).await.unwrap();

        store.update_high_score(id, 10).await.unwrap();
        // A stale lower write still lands; no compare-and-swap.
        store.update_high_score(id, 4).await.unwrap();

        let found = store.find_player(id).await.unwrap().unwrap();
        assert_eq!(found.high_score, 4);
    }
}

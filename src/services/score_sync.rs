//! Reconciles the local session's best score with the remote leaderboard.
//!
//! This service owns the local player profile and the leaderboard snapshot;
//! nothing else writes them. Every remote failure is consumed here: the
//! public operations log and degrade instead of propagating, so the game
//! state machine never observes leaderboard unavailability. Writes are
//! last-writer-wins at the store; concurrent sessions of the same identity
//! can race and the final stored value is whichever write lands last.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::dao::models::PlayerEntity;
use crate::dao::player_store::PlayerStore;
use crate::dto::render::LeaderboardRow;
use crate::error::SyncError;
use crate::services::identity::IdentityProvider;

/// Local view of this identity's remote record.
#[derive(Debug, Clone)]
pub struct PlayerProfile {
    /// Display name, `"guest"` until renamed.
    pub name: String,
    /// Best score known for this identity.
    pub high_score: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            name: "guest".to_string(),
            high_score: 0,
        }
    }
}

/// Score synchronization service.
pub struct ScoreSyncService {
    store: Arc<dyn PlayerStore>,
    identity: Option<Uuid>,
    profile: PlayerProfile,
    leaderboard: Vec<LeaderboardRow>,
}

impl ScoreSyncService {
    /// Service backed by `store`, not yet bootstrapped.
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self {
            store,
            identity: None,
            profile: PlayerProfile::default(),
            leaderboard: Vec::new(),
        }
    }

    /// Identity established at bootstrap, if any.
    pub fn identity(&self) -> Option<Uuid> {
        self.identity
    }

    /// This identity's display name as locally known.
    pub fn display_name(&self) -> &str {
        &self.profile.name
    }

    /// This identity's best score as locally known.
    pub fn high_score(&self) -> u32 {
        self.profile.high_score
    }

    /// Leaderboard snapshot, sorted descending by high score.
    pub fn leaderboard(&self) -> &[LeaderboardRow] {
        &self.leaderboard
    }

    /// Establish the anonymous identity, fetch the leaderboard, and
    /// load-or-create this identity's record.
    ///
    /// Each step degrades independently: without an identity the game is
    /// playable but nothing persists; without a leaderboard the snapshot
    /// stays empty; without a record the guest profile lives in memory only.
    pub async fn bootstrap(&mut self, provider: &dyn IdentityProvider) {
        let id = match provider.authenticate_anonymously().await {
            Ok(id) => id,
            Err(err) => {
                let err = SyncError::Identity(err);
                warn!(error = %err, "playing without persistence");
                return;
            }
        };
        self.identity = Some(id);

        self.fetch_leaderboard().await;

        if let Err(err) = self.try_load_or_create_profile(id).await {
            warn!(error = %err, "continuing with in-memory guest profile");
        }
    }

    /// Replace the leaderboard snapshot with a fresh full fetch.
    ///
    /// The snapshot is always re-derived wholesale, never patched; on
    /// failure the previous snapshot is kept.
    pub async fn fetch_leaderboard(&mut self) {
        if let Err(err) = self.try_fetch_leaderboard().await {
            warn!(error = %err, "keeping stale leaderboard snapshot");
        }
    }

    /// Persist a new personal best and refresh the leaderboard.
    ///
    /// The caller guarantees `new_score` strictly exceeds the known high
    /// score. The local profile is updated optimistically and not rolled
    /// back if the remote write fails.
    pub async fn submit_high_score(&mut self, new_score: u32) {
        self.profile.high_score = new_score;

        let Some(id) = self.identity else {
            info!(new_score, "no identity; high score kept locally only");
            return;
        };

        match self.store.update_high_score(id, new_score).await {
            Ok(()) => {
                info!(new_score, "high score persisted");
                self.fetch_leaderboard().await;
            }
            Err(source) => {
                let err = SyncError::RemoteWrite(source);
                warn!(error = %err, new_score, "local high score may diverge until next fetch");
            }
        }
    }

    /// Persist a new display name and refresh the leaderboard.
    ///
    /// No validation is applied; the empty string is accepted and overwrites
    /// the remote name.
    pub async fn rename_self(&mut self, new_name: String) {
        self.profile.name = new_name.clone();

        let Some(id) = self.identity else {
            info!(name = %new_name, "no identity; rename kept locally only");
            return;
        };

        match self.store.update_name(id, new_name).await {
            Ok(()) => self.fetch_leaderboard().await,
            Err(source) => {
                let err = SyncError::RemoteWrite(source);
                warn!(error = %err, "local display name may diverge until next fetch");
            }
        }
    }

    async fn try_fetch_leaderboard(&mut self) -> Result<(), SyncError> {
        let mut players = self
            .store
            .list_players()
            .await
            .map_err(SyncError::RemoteRead)?;

        players.sort_by(|a, b| b.high_score.cmp(&a.high_score));
        self.leaderboard = players
            .into_iter()
            .map(|player| LeaderboardRow {
                name: player.name,
                high_score: player.high_score,
            })
            .collect();
        Ok(())
    }

    async fn try_load_or_create_profile(&mut self, id: Uuid) -> Result<(), SyncError> {
        match self
            .store
            .find_player(id)
            .await
            .map_err(SyncError::RemoteRead)?
        {
            Some(record) => {
                info!(name = %record.name, high_score = record.high_score, "loaded player record");
                self.profile = PlayerProfile {
                    name: record.name,
                    high_score: record.high_score,
                };
            }
            None => {
                let guest = PlayerEntity::guest(id);
                self.store
                    .save_player(guest.clone())
                    .await
                    .map_err(SyncError::RecordCreate)?;
                info!("created fresh guest record");
                self.profile = PlayerProfile {
                    name: guest.name,
                    high_score: guest.high_score,
                };
            }
        }
        Ok(())
    }
}

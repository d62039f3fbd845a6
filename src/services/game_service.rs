//! Authoritative game orchestrator.
//!
//! Owns the session and its state machine, classifies each trigger press,
//! and drives the geometry engine, difficulty function, rotation controller,
//! and score sync service. This is the only writer of [`Session`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::info;

use crate::dto::render::RenderFrame;
use crate::services::rotation::RotationController;
use crate::services::score_sync::ScoreSyncService;
use crate::state::difficulty::rotation_duration;
use crate::state::geometry::{self, TrackGeometry};
use crate::state::{InvalidTransition, Session, SessionEvent, SessionMachine, SessionPhase};

/// What a single trigger press did, for observers and the demo driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Idle press armed the game; no hit test was run.
    Armed,
    /// Pointer overlapped the target; the run continues faster.
    Hit {
        /// Streak after this hit.
        streak: u32,
    },
    /// Pointer was clear of the target; the run ended.
    Busted {
        /// Score of the ended run.
        final_score: u32,
        /// Whether the score was submitted as a new personal best.
        new_personal_best: bool,
    },
    /// Busted press dismissed the overlay and armed the next run.
    Restarted,
}

/// Game service wiring the engine components together.
pub struct GameService {
    machine: SessionMachine,
    session: Session,
    geometry: TrackGeometry,
    rotation: Arc<dyn RotationController>,
    sync: ScoreSyncService,
    rng: StdRng,
}

impl GameService {
    /// Service starting idle with a zeroed session.
    pub fn new(
        geometry: TrackGeometry,
        rotation: Arc<dyn RotationController>,
        sync: ScoreSyncService,
    ) -> Self {
        Self::with_rng(geometry, rotation, sync, StdRng::from_os_rng())
    }

    /// Like [`GameService::new`] with a caller-provided RNG for target
    /// placement, so tests can seed it.
    pub fn with_rng(
        geometry: TrackGeometry,
        rotation: Arc<dyn RotationController>,
        sync: ScoreSyncService,
        rng: StdRng,
    ) -> Self {
        Self {
            machine: SessionMachine::new(),
            session: Session::new(),
            geometry,
            rotation,
            sync,
            rng,
        }
    }

    /// Current session phase.
    pub fn phase(&self) -> SessionPhase {
        self.machine.phase()
    }

    /// Read access to the score sync state (profile, leaderboard).
    pub fn sync(&self) -> &ScoreSyncService {
        &self.sync
    }

    /// Change this player's display name (delegated to score sync).
    pub async fn rename(&mut self, new_name: String) {
        self.sync.rename_self(new_name).await;
    }

    /// Process one debounced trigger press to completion.
    ///
    /// This is the system's single event entry point; the awaited score
    /// submission inside the miss path is what serializes submits per
    /// session.
    pub async fn handle_trigger(&mut self) -> Result<TriggerOutcome, InvalidTransition> {
        match self.machine.phase() {
            SessionPhase::Idle => {
                // The arm press is exempt from hit testing.
                self.machine.apply(SessionEvent::Arm)?;
                self.arm();
                Ok(TriggerOutcome::Armed)
            }
            SessionPhase::Playing => {
                let pointer_angle = self.rotation.angle_deg();
                let hit = geometry::pointer_hits_target(
                    pointer_angle,
                    self.session.target_angle_deg,
                    &self.geometry,
                );
                if hit {
                    self.machine.apply(SessionEvent::Hit)?;
                    self.score_hit();
                    Ok(TriggerOutcome::Hit {
                        streak: self.session.streak,
                    })
                } else {
                    self.machine.apply(SessionEvent::Miss)?;
                    let outcome = self.score_miss().await;
                    Ok(outcome)
                }
            }
            SessionPhase::Busted => {
                // One press both dismisses the overlay and re-arms.
                self.machine.apply(SessionEvent::Acknowledge)?;
                self.session.last_result = None;
                self.arm();
                Ok(TriggerOutcome::Restarted)
            }
        }
    }

    /// Place a fresh target and start rotating at the speed earned so far.
    fn arm(&mut self) {
        self.session.target_angle_deg = geometry::random_target_angle(&mut self.rng);
        self.rotation.start(
            self.session.direction,
            rotation_duration(self.session.streak),
        );
        info!(
            target_angle = self.session.target_angle_deg,
            streak = self.session.streak,
            "armed"
        );
    }

    fn score_hit(&mut self) {
        self.session.streak += 1;
        self.session.direction = self.session.direction.flipped();
        self.session.target_angle_deg = geometry::random_target_angle(&mut self.rng);
        self.rotation.start(
            self.session.direction,
            rotation_duration(self.session.streak),
        );
        info!(streak = self.session.streak, "hit");
    }

    async fn score_miss(&mut self) -> TriggerOutcome {
        self.rotation.stop();

        let final_score = self.session.streak;
        self.session.last_result = Some(final_score);

        let new_personal_best = final_score > self.sync.high_score();
        info!(final_score, new_personal_best, "busted");
        if new_personal_best {
            self.sync.submit_high_score(final_score).await;
        }

        self.session.streak = 0;
        TriggerOutcome::Busted {
            final_score,
            new_personal_best,
        }
    }

    /// Snapshot for the rendering boundary.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            phase: self.machine.phase(),
            streak: self.session.streak,
            direction: self.session.direction,
            pointer_angle_deg: self.rotation.angle_deg(),
            target_offset: geometry::target_offset(self.session.target_angle_deg, &self.geometry),
            overlay_score: self.session.last_result,
            leaderboard: self.sync.leaderboard().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::future::BoxFuture;
    use uuid::Uuid;

    use crate::dao::models::PlayerEntity;
    use crate::dao::player_store::PlayerStore;
    use crate::dao::player_store::memory::MemoryPlayerStore;
    use crate::dao::storage::StorageResult;
    use crate::services::identity::StaticIdentityProvider;
    use crate::services::rotation::ClockRotation;
    use crate::state::Direction;

    use super::*;

    /// Memory store that counts score writes and full fetches.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: MemoryPlayerStore,
        score_writes: Arc<AtomicUsize>,
        full_fetches: Arc<AtomicUsize>,
    }

    impl PlayerStore for CountingStore {
        fn find_player(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<PlayerEntity>>> {
            self.inner.find_player(id)
        }
        fn save_player(&self, player: PlayerEntity) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.save_player(player)
        }
        fn update_high_score(&self, id: Uuid, hs: u32) -> BoxFuture<'static, StorageResult<()>> {
            self.score_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_high_score(id, hs)
        }
        fn update_name(&self, id: Uuid, name: String) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.update_name(id, name)
        }
        fn list_players(&self) -> BoxFuture<'static, StorageResult<Vec<PlayerEntity>>> {
            self.full_fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.list_players()
        }
        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            self.inner.health_check()
        }
    }

    async fn service_with_store(store: Arc<dyn PlayerStore>) -> GameService {
        let mut sync = ScoreSyncService::new(store);
        sync.bootstrap(&StaticIdentityProvider::new(Uuid::new_v4()))
            .await;
        GameService::with_rng(
            TrackGeometry::default(),
            Arc::new(ClockRotation::new()),
            sync,
            StdRng::seed_from_u64(42),
        )
    }

    async fn service() -> GameService {
        service_with_store(Arc::new(MemoryPlayerStore::new())).await
    }

    /// With paused tokio time the pointer never moves off its base angle,
    /// so tests steer hit vs miss by planting the target.
    fn plant_target_at_pointer(service: &mut GameService) {
        service.session.target_angle_deg = service.rotation.angle_deg().round() as u16 % 360;
    }

    fn plant_target_opposite_pointer(service: &mut GameService) {
        service.session.target_angle_deg =
            (service.rotation.angle_deg().round() as u16 + 180) % 360;
    }

    #[tokio::test(start_paused = true)]
    async fn arm_press_never_hit_tests() {
        let mut service = service().await;
        // Pointer parked exactly on where the target will not be checked:
        // the outcome is Armed regardless of geometry.
        let outcome = service.handle_trigger().await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Armed);
        assert_eq!(service.phase(), SessionPhase::Playing);
        assert!(service.rotation.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn hit_increments_streak_and_flips_direction() {
        let mut service = service().await;
        service.handle_trigger().await.unwrap();
        let initial = service.session.direction;

        plant_target_at_pointer(&mut service);
        let outcome = service.handle_trigger().await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Hit { streak: 1 });
        assert_eq!(service.session.direction, initial.flipped());
        assert!(service.rotation.is_active());

        plant_target_at_pointer(&mut service);
        service.handle_trigger().await.unwrap();
        // Even number of hits restores the initial direction.
        assert_eq!(service.session.direction, initial);
    }

    #[tokio::test(start_paused = true)]
    async fn miss_busts_stops_rotation_and_resets_streak() {
        let mut service = service().await;
        service.handle_trigger().await.unwrap();
        plant_target_at_pointer(&mut service);
        service.handle_trigger().await.unwrap();

        plant_target_opposite_pointer(&mut service);
        let outcome = service.handle_trigger().await.unwrap();
        assert_eq!(
            outcome,
            TriggerOutcome::Busted {
                final_score: 1,
                new_personal_best: true,
            }
        );
        assert_eq!(service.phase(), SessionPhase::Busted);
        assert!(!service.rotation.is_active());
        assert_eq!(service.session.streak, 0);
        assert_eq!(service.session.last_result, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn busted_press_dismisses_and_rearms_in_one_event() {
        let mut service = service().await;
        service.handle_trigger().await.unwrap();
        plant_target_opposite_pointer(&mut service);
        service.handle_trigger().await.unwrap();
        assert_eq!(service.phase(), SessionPhase::Busted);

        let outcome = service.handle_trigger().await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Restarted);
        assert_eq!(service.phase(), SessionPhase::Playing);
        assert!(service.rotation.is_active());
        assert_eq!(service.session.last_result, None);
    }

    #[tokio::test(start_paused = true)]
    async fn streak_resets_even_without_a_personal_best() {
        let store = Arc::new(MemoryPlayerStore::new());
        let mut service = service_with_store(store).await;
        service.sync.submit_high_score(50).await;

        service.handle_trigger().await.unwrap();
        plant_target_at_pointer(&mut service);
        service.handle_trigger().await.unwrap();
        plant_target_opposite_pointer(&mut service);

        let outcome = service.handle_trigger().await.unwrap();
        assert_eq!(
            outcome,
            TriggerOutcome::Busted {
                final_score: 1,
                new_personal_best: false,
            }
        );
        assert_eq!(service.session.streak, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_below_remote_high_score_does_not_submit() {
        let counting = CountingStore::default();
        let mut service = service_with_store(Arc::new(counting.clone())).await;
        // Remote best is 7; a run of 5 must not write.
        service.sync.submit_high_score(7).await;
        let writes_before = counting.score_writes.load(Ordering::SeqCst);

        service.handle_trigger().await.unwrap();
        for _ in 0..5 {
            plant_target_at_pointer(&mut service);
            service.handle_trigger().await.unwrap();
        }
        plant_target_opposite_pointer(&mut service);
        let outcome = service.handle_trigger().await.unwrap();

        assert_eq!(
            outcome,
            TriggerOutcome::Busted {
                final_score: 5,
                new_personal_best: false,
            }
        );
        assert_eq!(counting.score_writes.load(Ordering::SeqCst), writes_before);
    }

    #[tokio::test(start_paused = true)]
    async fn personal_best_submits_once_then_fetches_once() {
        let counting = CountingStore::default();
        let mut service = service_with_store(Arc::new(counting.clone())).await;
        service.sync.submit_high_score(7).await;
        let writes_before = counting.score_writes.load(Ordering::SeqCst);
        let fetches_before = counting.full_fetches.load(Ordering::SeqCst);

        service.handle_trigger().await.unwrap();
        for _ in 0..10 {
            plant_target_at_pointer(&mut service);
            service.handle_trigger().await.unwrap();
        }
        plant_target_opposite_pointer(&mut service);
        let outcome = service.handle_trigger().await.unwrap();

        assert_eq!(
            outcome,
            TriggerOutcome::Busted {
                final_score: 10,
                new_personal_best: true,
            }
        );
        assert_eq!(
            counting.score_writes.load(Ordering::SeqCst),
            writes_before + 1
        );
        assert_eq!(
            counting.full_fetches.load(Ordering::SeqCst),
            fetches_before + 1
        );
        assert_eq!(service.sync.high_score(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn rotation_tracks_the_playing_phase() {
        let mut service = service().await;
        assert!(!service.rotation.is_active(), "idle means no motion");

        service.handle_trigger().await.unwrap();
        assert!(service.rotation.is_active(), "playing means motion");

        plant_target_opposite_pointer(&mut service);
        service.handle_trigger().await.unwrap();
        assert!(!service.rotation.is_active(), "busted means no motion");

        service.handle_trigger().await.unwrap();
        assert!(service.rotation.is_active(), "re-armed means motion");
    }

    #[tokio::test(start_paused = true)]
    async fn render_frame_reflects_session_and_leaderboard() {
        let mut service = service().await;
        service.handle_trigger().await.unwrap();
        plant_target_at_pointer(&mut service);
        service.handle_trigger().await.unwrap();
        plant_target_opposite_pointer(&mut service);
        service.handle_trigger().await.unwrap();

        let frame = service.render_frame();
        assert_eq!(frame.phase, SessionPhase::Busted);
        assert_eq!(frame.streak, 0);
        assert_eq!(frame.overlay_score, Some(1));
        // One hit flipped the initial counter-clockwise sense.
        assert_eq!(frame.direction, Direction::Clockwise);
        // The personal-best submit refetched the leaderboard.
        assert_eq!(frame.leaderboard.len(), 1);
    }
}

//! pop-the-rock binary entrypoint: a line-driven demo of the reflex game.
//!
//! Each entered line is one trigger press; `name <new name>` renames the
//! player, `board` prints the leaderboard, `quit` exits. Visual rendering is
//! out of scope, so the loop prints render frames through tracing instead.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pop_the_rock::config::AppConfig;
use pop_the_rock::dao::player_store::PlayerStore;
use pop_the_rock::dao::player_store::memory::MemoryPlayerStore;
use pop_the_rock::services::game_service::{GameService, TriggerOutcome};
use pop_the_rock::services::identity::FileIdentityProvider;
use pop_the_rock::services::rotation::ClockRotation;
use pop_the_rock::services::score_sync::ScoreSyncService;
use pop_the_rock::state::input::TriggerGate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();

    let store = connect_store().await;
    let mut sync = ScoreSyncService::new(store);
    let identity = FileIdentityProvider::new(&config.identity_path);
    sync.bootstrap(&identity).await;

    info!(
        name = sync.display_name(),
        high_score = sync.high_score(),
        "welcome; press enter to arm"
    );

    let rotation = Arc::new(ClockRotation::new());
    let mut game = GameService::new(config.track, rotation, sync);

    run_input_loop(&mut game).await
}

/// Connect the configured leaderboard backend, degrading to the in-memory
/// store when CouchDB is not configured or unreachable. Degraded play keeps
/// the game fully functional; scores simply do not survive the process.
async fn connect_store() -> Arc<dyn PlayerStore> {
    #[cfg(feature = "couch-store")]
    {
        use pop_the_rock::dao::player_store::couchdb::{CouchConfig, CouchPlayerStore};

        match CouchConfig::from_env() {
            Ok(couch) => match CouchPlayerStore::connect(couch).await {
                Ok(store) => {
                    info!("connected to CouchDB leaderboard");
                    return Arc::new(store);
                }
                Err(err) => {
                    warn!(error = %err, "leaderboard unreachable; scores will not persist")
                }
            },
            Err(err) => info!(reason = %err, "leaderboard not configured"),
        }
    }

    Arc::new(MemoryPlayerStore::new())
}

/// Drive the game from stdin until EOF, `quit`, or Ctrl+C.
async fn run_input_loop(game: &mut GameService) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut gate = TriggerGate::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match line.trim() {
                    "quit" => break,
                    "board" => print_leaderboard(game),
                    rename if rename.starts_with("name ") => {
                        let new_name = rename["name ".len()..].to_string();
                        game.rename(new_name).await;
                        info!(name = game.sync().display_name(), "renamed");
                    }
                    _ => handle_press(game, &mut gate).await,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    info!("goodbye");
    Ok(())
}

/// Feed one press/release pair through the debounce gate into the game.
async fn handle_press(game: &mut GameService, gate: &mut TriggerGate) {
    if !gate.press() {
        return;
    }

    match game.handle_trigger().await {
        Ok(TriggerOutcome::Armed) | Ok(TriggerOutcome::Restarted) => {
            let frame = game.render_frame();
            info!(
                target_offset = ?frame.target_offset,
                direction = ?frame.direction,
                "pointer is rotating"
            );
        }
        Ok(TriggerOutcome::Hit { streak }) => {
            info!(streak, "hit, speeding up");
        }
        Ok(TriggerOutcome::Busted {
            final_score,
            new_personal_best,
        }) => {
            info!(final_score, new_personal_best, "busted, press enter to retry");
            print_leaderboard(game);
        }
        Err(err) => warn!(error = %err, "trigger ignored"),
    }

    // Line input delivers no key-up, so release immediately.
    gate.release();
}

fn print_leaderboard(game: &GameService) {
    for (rank, row) in game.sync().leaderboard().iter().enumerate() {
        info!(rank = rank + 1, name = %row.name, high_score = row.high_score, "leaderboard");
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Headless skirmish runner.
//!
//! Assembles a [`Runtime`] on the demo arena, hands the player mech to the
//! [`Autopilot`], and plays until one side is gone or the turn limit hits.
//! Combat and AI events are streamed to the log as they happen.
//!
//! ```bash
//! RUST_LOG=ironclad_runtime=debug IRONCLAD_SEED=7 cargo run -p ironclad-client
//! ```
mod arena;
mod autopilot;
mod logging;

use anyhow::Result;
use autopilot::Autopilot;
use ironclad_runtime::{Event, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

const DEFAULT_MAX_TURNS: u64 = 500;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = logging::setup_logging(&logging::LogConfig::from_env())?;

    let mut config = RuntimeConfig::from_env();
    config.max_turns.get_or_insert(DEFAULT_MAX_TURNS);
    tracing::info!("Starting skirmish: seed={}, max_turns={:?}", config.seed, config.max_turns);

    let mut runtime = arena::builder()
        .config(config)
        .player_provider(Autopilot::default())
        .build()?;

    let combat_log = spawn_event_log(runtime.subscribe(Topic::Combat));
    let ai_log = spawn_event_log(runtime.subscribe(Topic::Ai));

    let summary = runtime.run().await?;
    tracing::info!("Finished after {} turns: {:?}", summary.turns, summary.reason);
    tracing::debug!("Scheduler:\n{}", runtime.debug_state());
    for info in runtime.enemy_debug_all() {
        tracing::debug!("{}", info);
    }

    // Dropping the runtime closes the bus and lets the log tasks drain.
    drop(runtime);
    combat_log.await?;
    ai_log.await?;
    Ok(())
}

fn spawn_event_log(mut rx: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match event.to_json() {
                    Ok(json) if matches!(event, Event::Combat(_)) => tracing::info!("{}", json),
                    Ok(json) => tracing::debug!("{}", json),
                    Err(e) => tracing::warn!("Failed to encode event: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event log lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

//! Headless server host.
//!
//! Loads content, opens the save directory, and runs the world until the
//! process receives Ctrl-C. Connections and command parsing live in front of
//! [`rpg_runtime::RuntimeHandle`] and are not part of this binary.
mod config;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use rpg_content::ContentFactory;
use rpg_runtime::{
    CombatEvent, Event, FilePlayerRepository, PlayerEvent, Runtime, RuntimeHandle, Topic,
    WorldEvent,
};
use tokio::sync::broadcast::error::RecvError;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();
    let _guard = logging::init(&config.log_dir)?;

    let mut content = ContentFactory::new(&config.data_dir)
        .load_all()
        .with_context(|| format!("Failed to load content from {}", config.data_dir.display()))?;
    if let Some(tick_ms) = config.tick_ms {
        content.config.tick_interval_ms = tick_ms;
    }

    let repository = FilePlayerRepository::new(&config.save_dir).with_context(|| {
        format!("Failed to open save directory {}", config.save_dir.display())
    })?;
    tracing::info!("Player saves: {}", repository.base_dir().display());

    let runtime = Runtime::builder()
        .config(config.runtime_config())
        .content(content)
        .repository(Arc::new(repository))
        .build()
        .await?;

    let journal = tokio::spawn(log_events(runtime.handle()));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    tracing::info!("Shutting down");

    journal.abort();
    runtime.shutdown().await?;

    Ok(())
}

/// Mirrors notable runtime events into the log.
async fn log_events(handle: RuntimeHandle) {
    let mut events = handle.subscribe_multiple(&[Topic::Player, Topic::World, Topic::Combat]);
    let (Some(mut player), Some(mut world), Some(mut combat)) = (
        events.remove(&Topic::Player),
        events.remove(&Topic::World),
        events.remove(&Topic::Combat),
    ) else {
        return;
    };

    loop {
        let received = tokio::select! {
            event = player.recv() => event,
            event = world.recv() => event,
            event = combat.recv() => event,
        };

        match received {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event journal lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Player(PlayerEvent::LoggedIn { name, restored, .. }) => {
            tracing::info!(player = %name, restored, "logged in");
        }
        Event::Player(PlayerEvent::LoggedOut { name, .. }) => {
            tracing::info!(player = %name, "logged out");
        }
        Event::Player(PlayerEvent::SaveFailed { name, error }) => {
            tracing::error!(player = %name, %error, "save failed");
        }
        Event::World(WorldEvent::Died { id, name }) => {
            tracing::info!(entity = %id, %name, "died");
        }
        Event::World(WorldEvent::Revived { id, name }) => {
            tracing::info!(entity = %id, %name, "revived");
        }
        Event::Combat(CombatEvent::Hit {
            attacker,
            victim,
            damage,
            critical,
            ..
        }) => {
            tracing::debug!(%attacker, %victim, damage, critical, "hit");
        }
        _ => {}
    }
}

//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for servers to drive the world.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use rpg_content::Content;
use rpg_core::{CombatHook, PcgRng, World};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::repository::{InMemoryPlayerRepository, PlayerRepository};
use crate::workers::{Command, SimulationWorker, WorkerSettings};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Drive the world on the configured tick interval. When disabled the
    /// world only advances through [`RuntimeHandle::step`].
    pub auto_tick: bool,
    pub autosave_interval: Option<Duration>,
    /// Where fresh players appear.
    pub start_location: String,
    /// Seed of the world's random source; random when unset.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 256,
            command_buffer_size: 32,
            auto_tick: true,
            autosave_interval: Some(Duration::from_secs(60)),
            start_location: "village".to_string(),
            seed: None,
        }
    }
}

/// Main runtime that orchestrates the game simulation
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Save every player and stop the worker.
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown().await?;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<Content>,
    repository: Option<Arc<dyn PlayerRepository>>,
    hooks: Vec<Arc<dyn CombatHook>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            repository: None,
            hooks: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the loaded content (required)
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// Set where players are saved. Defaults to an in-memory repository.
    pub fn repository(mut self, repository: Arc<dyn PlayerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Add a combat hook; hooks run in registration order.
    pub fn hook(mut self, hook: Arc<dyn CombatHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Build the runtime and spawn the simulation worker
    pub async fn build(self) -> Result<Runtime> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryPlayerRepository::new()));

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let tick_interval = Duration::from_millis(content.config.tick_interval_ms);

        let mut world = World::new(
            content.config.clone(),
            content.env(),
            Box::new(PcgRng::new(seed)),
        );
        for hook in self.hooks {
            world.register_hook(hook);
        }
        let monsters = content.monsters.populate(&mut world);
        info!(seed, monsters = monsters.len(), "world created");

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            world,
            content.items,
            content.shops,
            repository,
            command_rx,
            event_bus,
            WorkerSettings {
                start_location: self.config.start_location,
                tick_interval: self.config.auto_tick.then_some(tick_interval),
                autosave_interval: self.config.autosave_interval,
            },
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}

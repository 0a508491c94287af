//! Runtime orchestration for the RPG simulation.
//!
//! This crate wires the deterministic world from `rpg-core` to player
//! persistence and a background worker task, exposing a cohesive async API.
//! Consumers embed [`Runtime`] to run the world, subscribe to events, and
//! issue commands through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] persists players between sessions
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{CombatEvent, Event, EventBus, PlayerEvent, Topic, WorldEvent};
pub use repository::{
    FilePlayerRepository, InMemoryPlayerRepository, PlayerRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};

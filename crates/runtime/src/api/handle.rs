//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! logging players in and out, issuing gameplay commands, and streaming
//! events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use rpg_core::{AttackOptions, AttackOutcome, Effect, Entity, EntityId, ItemUse, ShopState, StatKind};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Log a player in, restoring the saved projection when one exists.
    pub async fn login(&self, name: impl Into<String>) -> Result<EntityId> {
        let name = name.into();
        self.request(|reply| Command::Login { name, reply }).await?
    }

    /// Save the player and remove them from the world.
    pub async fn logout(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.request(|reply| Command::Logout { name, reply }).await?
    }

    pub async fn attack(
        &self,
        attacker: EntityId,
        victim: EntityId,
        options: AttackOptions,
    ) -> Result<AttackOutcome> {
        self.request(|reply| Command::Attack {
            attacker,
            victim,
            options,
            reply,
        })
        .await
    }

    /// Returns `false` when the target is missing or the effect was rejected.
    pub async fn add_effect(&self, target: EntityId, effect: Effect) -> Result<bool> {
        self.request(|reply| Command::AddEffect {
            target,
            effect,
            reply,
        })
        .await
    }

    pub async fn allocate_stat(&self, id: EntityId, kind: StatKind, amount: u32) -> Result<()> {
        self.request(|reply| Command::AllocateStat {
            id,
            kind,
            amount,
            reply,
        })
        .await?
    }

    /// Equip or consume the inventory item at `index`.
    pub async fn use_item(&self, id: EntityId, index: usize) -> Result<ItemUse> {
        self.request(|reply| Command::UseItem { id, index, reply })
            .await?
    }

    /// Buy from the shop at the player's current location.
    pub async fn buy(&self, id: EntityId, item: impl Into<String>) -> Result<ShopState> {
        let item = item.into();
        self.request(|reply| Command::Trade {
            id,
            item,
            buy: true,
            reply,
        })
        .await?
    }

    /// Sell to the shop at the player's current location.
    pub async fn sell(&self, id: EntityId, item: impl Into<String>) -> Result<ShopState> {
        let item = item.into();
        self.request(|reply| Command::Trade {
            id,
            item,
            buy: false,
            reply,
        })
        .await?
    }

    /// Run `ticks` fixed steps immediately. Returns the world clock.
    pub async fn step(&self, ticks: u32) -> Result<u64> {
        self.request(|reply| Command::Step { ticks, reply }).await
    }

    /// Query a copy of one entity (read-only snapshot)
    pub async fn query(&self, id: EntityId) -> Result<Option<Entity>> {
        self.request(|reply| Command::Query { id, reply }).await
    }

    pub async fn status(&self, id: EntityId) -> Result<Option<String>> {
        self.request(|reply| Command::Status { id, reply }).await
    }

    /// Save every logged-in player. Returns how many saves succeeded.
    pub async fn save_all(&self) -> Result<usize> {
        self.request(|reply| Command::SaveAll { reply }).await
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - attack outcomes
    /// - `Topic::Player` - logins, saves and mailbox messages
    /// - `Topic::World` - ticks, deaths and revivals
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rpg_runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Handle combat events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

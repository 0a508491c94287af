//! Simulation worker that owns the authoritative [`rpg_core::World`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), advances
//! the world on a fixed interval, persists players through the
//! [`PlayerRepository`], and publishes events to the [`EventBus`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use rpg_core::{
    AttackOptions, AttackOutcome, Effect, Entity, EntityId, ItemCatalog, ItemUse, PlayerState,
    Shop, ShopState, StatKind, World,
};

use crate::api::{Result, RuntimeError};
use crate::events::{CombatEvent, Event, EventBus, PlayerEvent, WorldEvent};
use crate::repository::PlayerRepository;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Restore (or create) a player and put them in the world.
    Login {
        name: String,
        reply: oneshot::Sender<Result<EntityId>>,
    },
    /// Save a player and take them out of the world.
    Logout {
        name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Attack {
        attacker: EntityId,
        victim: EntityId,
        options: AttackOptions,
        reply: oneshot::Sender<AttackOutcome>,
    },
    AddEffect {
        target: EntityId,
        effect: Effect,
        reply: oneshot::Sender<bool>,
    },
    AllocateStat {
        id: EntityId,
        kind: StatKind,
        amount: u32,
        reply: oneshot::Sender<Result<()>>,
    },
    UseItem {
        id: EntityId,
        index: usize,
        reply: oneshot::Sender<Result<ItemUse>>,
    },
    /// Trade with the shop at the player's location.
    Trade {
        id: EntityId,
        item: String,
        buy: bool,
        reply: oneshot::Sender<Result<ShopState>>,
    },
    /// Advance the world by `ticks` fixed steps right away.
    Step {
        ticks: u32,
        reply: oneshot::Sender<u64>,
    },
    /// Query a copy of one entity (read-only).
    Query {
        id: EntityId,
        reply: oneshot::Sender<Option<Entity>>,
    },
    /// Render the status text of one entity.
    Status {
        id: EntityId,
        reply: oneshot::Sender<Option<String>>,
    },
    /// Save every logged-in player.
    SaveAll { reply: oneshot::Sender<usize> },
    /// Save everyone and stop the worker.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes gameplay commands and drives the tick.
pub struct SimulationWorker {
    world: World,
    catalog: ItemCatalog,
    shops: BTreeMap<String, Shop>,
    repository: Arc<dyn PlayerRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    sessions: BTreeMap<String, EntityId>,
    dead: BTreeSet<EntityId>,
    start_location: String,
    tick_interval: Option<Duration>,
    autosave_interval: Option<Duration>,
}

/// Settings the worker needs besides the world.
pub struct WorkerSettings {
    pub start_location: String,
    pub tick_interval: Option<Duration>,
    pub autosave_interval: Option<Duration>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        world: World,
        catalog: ItemCatalog,
        shops: BTreeMap<String, Shop>,
        repository: Arc<dyn PlayerRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        settings: WorkerSettings,
    ) -> Self {
        info!(
            "SimulationWorker initialized with {} entities, {} shops",
            world.len(),
            shops.len()
        );

        Self {
            world,
            catalog,
            shops,
            repository,
            command_rx,
            event_bus,
            sessions: BTreeMap::new(),
            dead: BTreeSet::new(),
            start_location: settings.start_location,
            tick_interval: settings.tick_interval,
            autosave_interval: settings.autosave_interval,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticker = self.tick_interval.map(interval);
        let mut autosave = self.autosave_interval.map(interval);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown { reply }) => {
                        self.save_all();
                        if reply.send(()).is_err() {
                            debug!("Shutdown reply channel closed (caller dropped)");
                        }
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        self.save_all();
                        break;
                    }
                },
                _ = next_tick(&mut ticker) => self.tick(),
                _ = next_tick(&mut autosave) => {
                    self.save_all();
                }
            }
        }

        info!("SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Login { name, reply } => {
                let result = self.login(&name);
                if let Err(e) = &result {
                    warn!(player = %name, error = %e, "login refused");
                }
                respond(reply, result, "Login");
            }
            Command::Logout { name, reply } => {
                let result = self.logout(&name);
                respond(reply, result, "Logout");
            }
            Command::Attack {
                attacker,
                victim,
                options,
                reply,
            } => {
                let outcome = self.world.attack(attacker, victim, options);
                self.event_bus.publish(Event::Combat(CombatEvent::from_outcome(
                    attacker, victim, &outcome,
                )));
                respond(reply, outcome, "Attack");
            }
            Command::AddEffect {
                target,
                effect,
                reply,
            } => {
                let added = self.world.add_effect(target, effect);
                respond(reply, added, "AddEffect");
            }
            Command::AllocateStat {
                id,
                kind,
                amount,
                reply,
            } => {
                let result = self
                    .world
                    .allocate_stat(id, kind, amount)
                    .map_err(RuntimeError::from);
                respond(reply, result, "AllocateStat");
            }
            Command::UseItem { id, index, reply } => {
                let result = self.world.use_item(id, index).map_err(RuntimeError::from);
                respond(reply, result, "UseItem");
            }
            Command::Trade {
                id,
                item,
                buy,
                reply,
            } => {
                let result = self.trade(id, &item, buy);
                respond(reply, result, "Trade");
            }
            Command::Step { ticks, reply } => {
                for _ in 0..ticks {
                    self.tick();
                }
                respond(reply, self.world.now_ms(), "Step");
            }
            Command::Query { id, reply } => {
                respond(reply, self.world.get(id).cloned(), "Query");
            }
            Command::Status { id, reply } => {
                respond(reply, self.world.status(id), "Status");
            }
            Command::SaveAll { reply } => {
                let saved = self.save_all();
                respond(reply, saved, "SaveAll");
            }
            Command::Shutdown { reply } => {
                // handled by the run loop
                respond(reply, (), "Shutdown");
            }
        }
        self.flush_messages();
    }

    fn tick(&mut self) {
        self.world.step();
        self.publish_deaths();
        self.event_bus.publish(Event::World(WorldEvent::Ticked {
            now_ms: self.world.now_ms(),
            entities: self.world.len(),
        }));
        self.flush_messages();
    }

    /// Compares the dead set before and after the tick.
    fn publish_deaths(&mut self) {
        let now_dead: BTreeSet<EntityId> = self
            .world
            .iter()
            .filter(|e| e.is_living() && e.is_dead())
            .map(|e| e.id)
            .collect();

        for id in now_dead.difference(&self.dead) {
            let name = self.name_of(*id);
            self.event_bus
                .publish(Event::World(WorldEvent::Died { id: *id, name }));
        }
        for id in self.dead.difference(&now_dead) {
            if self.world.contains(*id) {
                let name = self.name_of(*id);
                self.event_bus
                    .publish(Event::World(WorldEvent::Revived { id: *id, name }));
            }
        }
        self.dead = now_dead;
    }

    fn name_of(&self, id: EntityId) -> String {
        self.world
            .get(id)
            .map(|e| e.name.clone())
            .unwrap_or_default()
    }

    /// Delivers queued mailbox lines of logged-in players as events.
    fn flush_messages(&mut self) {
        let ids: Vec<EntityId> = self.sessions.values().copied().collect();
        for id in ids {
            for text in self.world.drain_messages(id) {
                self.event_bus
                    .publish(Event::Player(PlayerEvent::Message { id, text }));
            }
        }
    }

    fn login(&mut self, name: &str) -> Result<EntityId> {
        if self.sessions.contains_key(name) {
            return Err(RuntimeError::AlreadyLoggedIn(name.to_string()));
        }

        let (id, restored) = match self.repository.load(name)? {
            Some(mut data) => {
                if data.location.is_none() {
                    data.location = Some(self.start_location.clone());
                }
                (self.world.restore_player(&data, &self.catalog)?, true)
            }
            None => {
                let location = self.start_location.clone();
                let id = self.world.spawn(|id| {
                    Entity::player(id, name, PlayerState::default()).with_location(location)
                });
                (id, false)
            }
        };

        info!(player = %name, entity = %id, restored, "player logged in");
        self.sessions.insert(name.to_string(), id);
        self.event_bus.publish(Event::Player(PlayerEvent::LoggedIn {
            id,
            name: name.to_string(),
            restored,
        }));
        Ok(id)
    }

    fn logout(&mut self, name: &str) -> Result<()> {
        let id = *self
            .sessions
            .get(name)
            .ok_or_else(|| RuntimeError::NotLoggedIn(name.to_string()))?;

        self.save_player(name, id)?;
        self.flush_messages();
        self.sessions.remove(name);
        self.world.remove(id);
        self.dead.remove(&id);

        info!(player = %name, entity = %id, "player logged out");
        self.event_bus.publish(Event::Player(PlayerEvent::LoggedOut {
            id,
            name: name.to_string(),
        }));
        Ok(())
    }

    fn trade(&mut self, id: EntityId, item: &str, buy: bool) -> Result<ShopState> {
        let location = self
            .world
            .get(id)
            .ok_or(RuntimeError::UnknownEntity(id))?
            .location
            .clone()
            .unwrap_or_default();
        let shop = self
            .shops
            .get_mut(&location)
            .ok_or_else(|| RuntimeError::NoShop(location.clone()))?;

        let state = if buy {
            self.world.buy(id, shop, &self.catalog, item)?
        } else {
            self.world.sell(id, shop, item)?
        };
        Ok(state)
    }

    fn save_player(&self, name: &str, id: EntityId) -> Result<()> {
        let data = self
            .world
            .get(id)
            .ok_or(RuntimeError::UnknownEntity(id))?
            .to_player_data()
            .map_err(rpg_core::CommandError::from)?;

        match self.repository.save(&data) {
            Ok(()) => {
                self.event_bus.publish(Event::Player(PlayerEvent::Saved {
                    name: name.to_string(),
                }));
                Ok(())
            }
            Err(e) => {
                error!(player = %name, error = %e, "failed to save player");
                self.event_bus.publish(Event::Player(PlayerEvent::SaveFailed {
                    name: name.to_string(),
                    error: e.to_string(),
                }));
                Err(e.into())
            }
        }
    }

    /// Saves every session; failures are logged and skipped.
    fn save_all(&self) -> usize {
        let saved = self
            .sessions
            .iter()
            .filter(|(name, id)| self.save_player(name, **id).is_ok())
            .count();
        debug!(saved, sessions = self.sessions.len(), "autosave");
        saved
    }
}

fn interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Waits for the next tick, or forever when the timer is disabled.
async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn respond<T>(reply: oneshot::Sender<T>, value: T, command: &str) {
    if reply.send(value).is_err() {
        debug!("{} reply channel closed (caller dropped)", command);
    }
}

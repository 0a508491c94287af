//! Monster templates and spawn points.

use std::collections::BTreeMap;

use rpg_core::{AttributeKind, Entity, EntityId, MonsterState, Resources, World};

/// Stat block a monster is instantiated from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_level"))]
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exp_reward: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_reward: u64,
    /// Base values overriding the attribute catalog defaults.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<AttributeKind, f64>,
}

#[cfg(feature = "serde")]
fn default_level() -> u32 {
    1
}

impl MonsterTemplate {
    /// Builds a fresh monster with full resources.
    pub fn instantiate(&self, id: EntityId, location: &str) -> Entity {
        let mut state = MonsterState::new(self.name.clone(), self.exp_reward);
        state.gold_reward = self.gold_reward;

        let mut entity = Entity::monster(id, self.name.clone(), state).with_location(location);
        entity.level = self.level.max(1);
        for (kind, value) in &self.attributes {
            entity.attribute.set_default(*kind, *value);
        }
        entity.attribute.update_values();
        entity.resources = Resources::at_max(&entity.attribute);
        entity
    }
}

/// `count` monsters of `template` placed at `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSpawn {
    pub template: String,
    pub location: String,
    #[cfg_attr(feature = "serde", serde(default = "default_count"))]
    pub count: u32,
}

#[cfg(feature = "serde")]
fn default_count() -> u32 {
    1
}

/// Every monster template plus where the world starts them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterBook {
    pub templates: Vec<MonsterTemplate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spawns: Vec<MonsterSpawn>,
}

impl MonsterBook {
    pub fn template(&self, name: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Spawns every configured monster into `world`. Spawns naming an unknown
    /// template are skipped with a warning; returns the spawned ids.
    pub fn populate(&self, world: &mut World) -> Vec<EntityId> {
        let mut spawned = Vec::new();
        for spawn in &self.spawns {
            let Some(template) = self.template(&spawn.template) else {
                tracing::warn!(template = %spawn.template, "spawn names an unknown monster template");
                continue;
            };
            for _ in 0..spawn.count {
                spawned.push(world.spawn(|id| template.instantiate(id, &spawn.location)));
            }
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{Env, ResourceKind};

    fn book() -> MonsterBook {
        MonsterBook {
            templates: vec![MonsterTemplate {
                name: "wolf".into(),
                level: 3,
                exp_reward: 40.0,
                gold_reward: 5,
                attributes: BTreeMap::from([(AttributeKind::MaxLife, 250.0)]),
            }],
            spawns: vec![
                MonsterSpawn {
                    template: "wolf".into(),
                    location: "forest".into(),
                    count: 2,
                },
                MonsterSpawn {
                    template: "dragon".into(),
                    location: "forest".into(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn populate_places_known_templates() {
        let mut world = World::seeded(Env::default(), 1);
        let ids = book().populate(&mut world);

        assert_eq!(ids.len(), 2);
        let wolf = world.get(ids[0]).unwrap();
        assert_eq!(wolf.level, 3);
        assert_eq!(wolf.location.as_deref(), Some("forest"));
        assert_eq!(wolf.max(ResourceKind::Life), 250.0);
        assert_eq!(wolf.resources.life, 250.0);
        assert_eq!(wolf.as_monster().unwrap().gold_reward, 5);
    }
}

//! The sample data directory at the workspace root must always load.

use std::path::PathBuf;

use rpg_content::ContentFactory;
use rpg_core::{Env, World};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn sample_data_loads() {
    let content = ContentFactory::new(data_dir()).load_all().unwrap();

    assert_eq!(content.config.tick_interval_ms, 100);
    assert!(content.items.contains("iron sword"));
    let scroll = content.items.instantiate("ward scroll").unwrap();
    assert!(scroll.consume.and_then(|c| c.shield).is_some());
    assert!(content.shops.contains_key("village"));
    assert!(content.env().zones().is_peaceful("village"));
    assert!(!content.env().zones().is_peaceful("forest"));
}

#[test]
fn sample_monsters_populate_a_world() {
    let content = ContentFactory::new(data_dir()).load_all().unwrap();
    let env: Env = content.env();
    let mut world = World::seeded(env, 1);

    let spawned = content.monsters.populate(&mut world);
    let expected: u32 = content.monsters.spawns.iter().map(|s| s.count).sum();
    assert_eq!(spawned.len(), expected as usize);
    assert!(world.iter().all(|e| e.is_monster() && e.location.is_some()));
}

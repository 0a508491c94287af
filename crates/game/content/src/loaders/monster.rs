//! Monster template loader.

use std::collections::BTreeSet;
use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::monster::MonsterBook;

/// Loader for monster templates and spawns from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<MonsterBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses the book and checks that template names are unique, rewards
    /// are finite and every spawn names a known template.
    pub fn parse(content: &str) -> LoadResult<MonsterBook> {
        let book: MonsterBook = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster book RON: {}", e))?;

        let mut names = BTreeSet::new();
        for template in &book.templates {
            if !names.insert(template.name.as_str()) {
                anyhow::bail!("duplicate monster template `{}`", template.name);
            }
            if !template.exp_reward.is_finite() || template.exp_reward < 0.0 {
                anyhow::bail!("monster `{}` has an invalid exp reward", template.name);
            }
            if let Some((kind, _)) = template.attributes.iter().find(|(_, v)| !v.is_finite()) {
                anyhow::bail!("monster `{}` has a non-finite {}", template.name, kind);
            }
        }
        for spawn in &book.spawns {
            if !names.contains(spawn.template.as_str()) {
                anyhow::bail!("spawn at `{}` names unknown monster `{}`", spawn.location, spawn.template);
            }
        }
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::AttributeKind;

    const MONSTERS: &str = r#"(
        templates: [
            (name: "slime", exp_reward: 10.0, gold_reward: 2, attributes: { MAX_LIFE: 40.0 }),
            (name: "wolf", level: 3, exp_reward: 35.0, attributes: { ATTACK: 18.0, MOVE_SPEED: 140.0 }),
        ],
        spawns: [
            (template: "slime", location: "meadow", count: 3),
            (template: "wolf", location: "forest"),
        ],
    )"#;

    #[test]
    fn parses_templates_and_spawns() {
        let book = MonsterLoader::parse(MONSTERS).unwrap();
        assert_eq!(book.templates.len(), 2);
        assert_eq!(book.templates[0].level, 1);
        assert_eq!(book.spawns[1].count, 1);
        assert_eq!(
            book.template("wolf").unwrap().attributes[&AttributeKind::MoveSpeed],
            140.0
        );
    }

    #[test]
    fn unknown_spawn_template_fails() {
        let broken = MONSTERS.replace(r#"template: "wolf""#, r#"template: "bear""#);
        assert!(MonsterLoader::parse(&broken).is_err());
    }
}

//! Current resource pools and their semantic progress bars.
//!
//! Current values are stored; maximums always come from the committed
//! attribute set (`MAX_LIFE`, `MAX_MANA`, ...).

use crate::stats::{AttributeKind, AttributeSet};

/// Enum representing individual resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Life,
    Mana,
    Air,
    Water,
    Food,
}

impl ResourceKind {
    /// Attribute holding this pool's maximum.
    pub const fn max_attribute(self) -> AttributeKind {
        match self {
            Self::Life => AttributeKind::MaxLife,
            Self::Mana => AttributeKind::MaxMana,
            Self::Air => AttributeKind::MaxAir,
            Self::Water => AttributeKind::MaxWater,
            Self::Food => AttributeKind::MaxFood,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Life => "Life",
            Self::Mana => "Mana",
            Self::Air => "Air",
            Self::Water => "Water",
            Self::Food => "Food",
        }
    }
}

/// Current values of every pool.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub life: f64,
    pub mana: f64,
    pub air: f64,
    pub water: f64,
    pub food: f64,
}

impl Resources {
    /// All pools filled to the committed maximums.
    pub fn at_max(attributes: &AttributeSet) -> Self {
        Self {
            life: attributes.get_value(AttributeKind::MaxLife),
            mana: attributes.get_value(AttributeKind::MaxMana),
            air: attributes.get_value(AttributeKind::MaxAir),
            water: attributes.get_value(AttributeKind::MaxWater),
            food: attributes.get_value(AttributeKind::MaxFood),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Life => self.life,
            ResourceKind::Mana => self.mana,
            ResourceKind::Air => self.air,
            ResourceKind::Water => self.water,
            ResourceKind::Food => self.food,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut f64 {
        match kind {
            ResourceKind::Life => &mut self.life,
            ResourceKind::Mana => &mut self.mana,
            ResourceKind::Air => &mut self.air,
            ResourceKind::Water => &mut self.water,
            ResourceKind::Food => &mut self.food,
        }
    }

    /// Clamps every pool to `[0, max]`, except life which is only capped
    /// from above so that death remains detectable.
    pub fn clamp_to(&mut self, attributes: &AttributeSet) {
        for kind in [
            ResourceKind::Life,
            ResourceKind::Mana,
            ResourceKind::Air,
            ResourceKind::Water,
            ResourceKind::Food,
        ] {
            let max = attributes.get_value(kind.max_attribute()).max(0.0);
            let value = self.get_mut(kind);
            *value = value.min(max);
            if kind != ResourceKind::Life {
                *value = value.max(0.0);
            }
        }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::at_max(&AttributeSet::new())
    }
}

/// How a bar's numbers are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarMode {
    Percent,
    Absolute,
}

/// Semantic progress-bar data handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressBar {
    pub label: &'static str,
    pub current: f64,
    pub max: f64,
    pub mode: BarMode,
}

impl ProgressBar {
    pub const WIDTH: usize = 10;

    pub fn new(label: &'static str, current: f64, max: f64, mode: BarMode) -> Self {
        Self {
            label,
            current,
            max,
            mode,
        }
    }

    /// Filled fraction in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Plain-text rendering, e.g. `Life [######----] 60%`.
    pub fn render(&self) -> String {
        let filled = (self.ratio() * Self::WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(Self::WIDTH - filled));
        match self.mode {
            BarMode::Percent => format!("{} [{}] {:.0}%", self.label, bar, self.ratio() * 100.0),
            BarMode::Absolute => format!(
                "{} [{}] {:.0}/{:.0}",
                self.label,
                bar,
                self.current.max(0.0),
                self.max
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_negative_life() {
        let attributes = AttributeSet::new();
        let mut resources = Resources::at_max(&attributes);
        resources.life = -20.0;
        resources.mana = 999.0;
        resources.food = -1.0;

        resources.clamp_to(&attributes);

        assert_eq!(resources.life, -20.0);
        assert_eq!(resources.mana, 50.0);
        assert_eq!(resources.food, 0.0);
    }

    #[test]
    fn bar_renders_both_modes() {
        let bar = ProgressBar::new("Life", 60.0, 100.0, BarMode::Percent);
        assert_eq!(bar.render(), "Life [######----] 60%");

        let bar = ProgressBar::new("Life", 25.0, 50.0, BarMode::Absolute);
        assert_eq!(bar.render(), "Life [#####-----] 25/50");

        let dead = ProgressBar::new("Life", -5.0, 50.0, BarMode::Absolute);
        assert_eq!(dead.render(), "Life [----------] 0/50");
    }
}

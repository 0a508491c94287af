//! Queued attribute modifiers and the textual modifier format.
//!
//! Content declares item and effect bonuses as strings keyed by attribute
//! name:
//!
//! ```text
//! { "ATTACK": "+12", "MOVE_SPEED": "-5", "DEFEND": "10%", "MAX_LIFE": "+20 5%" }
//! ```
//!
//! A token ending in `%` becomes a multiplier `1 + pct/100`; any other token
//! is an additive delta. Several tokens in one string yield several modifiers.

use std::sync::LazyLock;

use regex::Regex;

use super::kind::AttributeKind;

/// `[+-]?digits[.digits]%?`; anything between tokens is ignored.
static TOKEN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([+-]?\d+(?:\.\d+)?)(%)?"));

/// A single queued delta to one attribute, applied at the next commit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub is_multiplier: bool,
    pub kind: AttributeKind,
    pub value: f64,
}

impl Modifier {
    /// Additive delta.
    pub const fn add(kind: AttributeKind, value: f64) -> Self {
        Self {
            is_multiplier: false,
            kind,
            value,
        }
    }

    /// Multiplicative factor.
    pub const fn multiply(kind: AttributeKind, factor: f64) -> Self {
        Self {
            is_multiplier: true,
            kind,
            value: factor,
        }
    }

    /// Renders the modifier back into its textual token.
    pub fn to_token(&self) -> String {
        if self.is_multiplier {
            format!("{}%", format_number((self.value - 1.0) * 100.0))
        } else if self.value >= 0.0 {
            format!("+{}", format_number(self.value))
        } else {
            format_number(self.value)
        }
    }
}

fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Errors raised while parsing textual modifiers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierParseError {
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("attribute `{attribute}` has no numeric value in `{raw}`")]
    MissingValue { attribute: String, raw: String },

    #[error("modifier pattern failed to compile: {0}")]
    Pattern(String),
}

impl crate::error::GameError for ModifierParseError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }
}

/// Parses `{attribute: "+N" | "-N" | "N%"}` pairs into modifiers.
///
/// Pairs are processed in iteration order and tokens left to right, so the
/// output order is deterministic for ordered inputs.
pub fn parse_modifiers<'a, I>(entries: I) -> Result<Vec<Modifier>, ModifierParseError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let token = TOKEN
        .as_ref()
        .map_err(|e| ModifierParseError::Pattern(e.to_string()))?;

    let mut modifiers = Vec::new();
    for (name, raw) in entries {
        let kind = AttributeKind::from_name(name.trim())
            .ok_or_else(|| ModifierParseError::UnknownAttribute(name.to_string()))?;

        let before = modifiers.len();
        for caps in token.captures_iter(raw) {
            let Ok(value) = caps[1].parse::<f64>() else {
                continue;
            };
            let modifier = if caps.get(2).is_some() {
                Modifier::multiply(kind, 1.0 + value / 100.0)
            } else {
                Modifier::add(kind, value)
            };
            modifiers.push(modifier);
        }

        if modifiers.len() == before {
            return Err(ModifierParseError::MissingValue {
                attribute: name.to_string(),
                raw: raw.to_string(),
            });
        }
    }
    Ok(modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_additive_and_percent_tokens() {
        let mods = parse_modifiers([("ATTACK", "+12"), ("MOVE_SPEED", "-5"), ("DEFEND", "10%")])
            .unwrap();

        assert_eq!(
            mods,
            vec![
                Modifier::add(AttributeKind::Attack, 12.0),
                Modifier::add(AttributeKind::MoveSpeed, -5.0),
                Modifier::multiply(AttributeKind::Defend, 1.1),
            ]
        );
    }

    #[test]
    fn unsigned_number_is_additive() {
        let mods = parse_modifiers([("MAX_LIFE", "20")]).unwrap();
        assert_eq!(mods, vec![Modifier::add(AttributeKind::MaxLife, 20.0)]);
    }

    #[test]
    fn negative_percent_shrinks() {
        let mods = parse_modifiers([("ATTACK_SPEED", "-25%")]).unwrap();
        assert_eq!(mods, vec![Modifier::multiply(AttributeKind::AttackSpeed, 0.75)]);
    }

    #[test]
    fn each_token_is_a_separate_modifier() {
        let mods = parse_modifiers([("MAX_LIFE", "+20 5%, -2.5")]).unwrap();
        assert_eq!(mods.len(), 3);
        assert_eq!(mods[0], Modifier::add(AttributeKind::MaxLife, 20.0));
        assert_eq!(mods[1], Modifier::multiply(AttributeKind::MaxLife, 1.05));
        assert_eq!(mods[2], Modifier::add(AttributeKind::MaxLife, -2.5));
    }

    #[test]
    fn words_between_tokens_are_ignored() {
        let mods = parse_modifiers([("DEFEND", "roughly +4 and 12.5% more")]).unwrap();
        assert_eq!(
            mods,
            vec![
                Modifier::add(AttributeKind::Defend, 4.0),
                Modifier::multiply(AttributeKind::Defend, 1.125),
            ]
        );
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let err = parse_modifiers([("LUCK", "+1")]).unwrap_err();
        assert_eq!(err, ModifierParseError::UnknownAttribute("LUCK".into()));
    }

    #[test]
    fn value_without_number_is_rejected() {
        let err = parse_modifiers([("ATTACK", "lots")]).unwrap_err();
        assert!(matches!(err, ModifierParseError::MissingValue { .. }));
    }

    #[test]
    fn tokens_render_back() {
        assert_eq!(Modifier::add(AttributeKind::Attack, 12.0).to_token(), "+12");
        assert_eq!(Modifier::add(AttributeKind::Attack, -3.5).to_token(), "-3.5");
        assert_eq!(Modifier::multiply(AttributeKind::Attack, 1.1).to_token(), "10%");
    }
}

//! Attribute system.
//!
//! # Architecture
//!
//! ```text
//! [ Stat points ] ──┐
//! [ Equipment   ] ──┼─► Modifier queue ─► AttributeSet::update_values ─► committed values
//! [ Effects     ] ──┘                     (once per tick)
//! ```
//!
//! ## Principles
//!
//! 1. **Closed catalog**: [`AttributeKind`] is a compile-time enum
//! 2. **Commit boundary**: readers only see values committed this tick
//! 3. **Order**: `clamp(default + Σadd, min, max) × Πmul`, never re-clamped
//! 4. **Stable names**: persisted data keys attributes by name

pub mod kind;
pub mod modifier;
pub mod set;
pub mod stat;

pub use kind::{AttributeKind, AttributeSpec};
pub use modifier::{Modifier, ModifierParseError, parse_modifiers};
pub use set::{AttributeSet, defend_ratio};
pub use stat::{Stat, StatError, StatKind};

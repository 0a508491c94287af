use core::fmt;

/// Identifier of an entity inside one [`World`](crate::world::World).
///
/// Ids are allocated monotonically and never reused by the same world, so
/// ordering by id is insertion order. An id held by another entity is a weak
/// reference: it resolves by lookup and a missing entity means "none".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityId(pub u32);

impl EntityId {
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

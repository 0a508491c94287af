//! Read-only world collaborators.
//!
//! The core never owns map content. Zone rules and resource ownership
//! policy are injected through the [`Env`] bundle so hosts can back them
//! with whatever content store they use.

mod policy;
mod zone;

use std::sync::Arc;

pub use policy::{OwnerOnlyPolicy, ResourcePolicy};
pub use zone::{Zone, ZoneOracle, ZoneTable};

use crate::error::CoreError;

/// Oracles consulted by the world while resolving actions.
#[derive(Clone)]
pub struct Env {
    zones: Arc<dyn ZoneOracle>,
    resources: Arc<dyn ResourcePolicy>,
}

impl Env {
    pub fn new(zones: Arc<dyn ZoneOracle>, resources: Arc<dyn ResourcePolicy>) -> Self {
        Self { zones, resources }
    }

    /// Zones from `zones`, default resource policy.
    pub fn with_zones(zones: impl ZoneOracle + 'static) -> Self {
        Self::new(Arc::new(zones), Arc::new(OwnerOnlyPolicy))
    }

    pub fn zones(&self) -> &dyn ZoneOracle {
        self.zones.as_ref()
    }

    pub fn resources(&self) -> &dyn ResourcePolicy {
        self.resources.as_ref()
    }

    /// Resolves `location`, failing loudly when the content has no such zone.
    pub fn require_zone(&self, location: &str) -> Result<Zone, CoreError> {
        self.zones
            .zone(location)
            .ok_or_else(|| CoreError::MissingLocation {
                location: location.to_string(),
            })
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::with_zones(ZoneTable::new())
    }
}

impl core::fmt::Debug for Env {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_lookup() {
        let env = Env::with_zones(
            ZoneTable::new()
                .with("village", Zone::new("Village", true))
                .with("forest", Zone::new("Forest", false)),
        );

        assert!(env.zones().is_peaceful("village"));
        assert!(!env.zones().is_peaceful("forest"));
        assert!(!env.zones().is_peaceful("nowhere"));
        assert_eq!(
            env.require_zone("nowhere"),
            Err(CoreError::MissingLocation {
                location: "nowhere".into()
            })
        );
    }
}

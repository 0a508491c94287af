use crate::entity::Entity;

/// Decides whether an abuser may destroy a resource node.
pub trait ResourcePolicy: Send + Sync {
    /// `Err` carries the reason shown to the abuser.
    fn can_destroy(&self, abuser: &Entity, resource: &Entity) -> Result<(), String>;
}

/// Unowned resources are fair game; owned ones only yield to their owner.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnerOnlyPolicy;

impl ResourcePolicy for OwnerOnlyPolicy {
    fn can_destroy(&self, abuser: &Entity, resource: &Entity) -> Result<(), String> {
        let owner = match &resource.kind {
            crate::entity::EntityKind::Resource(state) => state.owner,
            _ => None,
        };
        match owner {
            Some(owner) if owner != abuser.id => {
                Err(format!("{} belongs to someone else.", resource.name))
            }
            _ => Ok(()),
        }
    }
}

use std::any::Any;

use logic_ids::{CapabilityID, ObjectID};

use super::PhysicsBody;

/// Optional behaviour attached to a scene object.
pub trait Capability: Any {
    fn capability_id(&self) -> CapabilityID;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_physics_body_mut(&mut self) -> Option<&mut dyn PhysicsBody> {
        None
    }
}

pub trait CapabilityAPI {
    fn capability_mut(
        &mut self,
        object: ObjectID,
        id: CapabilityID,
    ) -> Option<&mut dyn Capability>;
}

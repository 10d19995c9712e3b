use logic_context::{Capability, PHYSICS_BODY};
use logic_ids::{CapabilityID, ObjectID};

use crate::capability_registry::CapabilityRegistry;
use crate::object_arena::{ObjectArena, SceneObject};
use crate::rigid_body::{RigidBody, RigidBodyDesc};
use crate::{Result, TreeError};

/// Objects plus the capabilities attached to them. Logic trees borrow the
/// world mutably for the duration of one run.
#[derive(Default)]
pub struct World {
    objects: ObjectArena,
    capabilities: CapabilityRegistry,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named object. Names are unique so scene data can refer to them.
    pub fn spawn(&mut self, name: impl Into<String>) -> Result<ObjectID> {
        let name = name.into();
        if self.objects.find_by_name(&name).is_some() {
            return Err(TreeError::DuplicateObject(name));
        }
        let id = self.objects.insert(SceneObject::new(name));
        log::trace!("spawned object {id}");
        Ok(id)
    }

    /// Removes the object and everything attached to it.
    pub fn despawn(&mut self, id: ObjectID) -> bool {
        if self.objects.remove(id).is_none() {
            return false;
        }
        let dropped = self.capabilities.detach_all(id);
        log::trace!("despawned object {id} ({dropped} capabilities)");
        true
    }

    pub fn find(&self, name: &str) -> Option<ObjectID> {
        self.objects.find_by_name(name)
    }

    pub fn contains(&self, id: ObjectID) -> bool {
        self.objects.contains(id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectID, &SceneObject)> {
        self.objects.iter()
    }

    pub fn attach(&mut self, id: ObjectID, capability: Box<dyn Capability>) -> Result<()> {
        if !self.objects.contains(id) {
            return Err(TreeError::DeadObject(id));
        }
        self.capabilities.attach(id, capability)
    }

    pub fn add_rigid_body(&mut self, id: ObjectID, desc: RigidBodyDesc) -> Result<()> {
        self.attach(id, Box::new(RigidBody::new(desc)))
    }

    /// Capability lookup. Stale object IDs resolve to nothing.
    pub fn capability_mut(&mut self, id: ObjectID, capability: CapabilityID) -> Option<&mut dyn Capability> {
        if !self.objects.contains(id) {
            return None;
        }
        self.capabilities.get_mut(id, capability)
    }

    pub fn rigid_body(&self, id: ObjectID) -> Option<&RigidBody> {
        if !self.objects.contains(id) {
            return None;
        }
        self.capabilities
            .get(id, PHYSICS_BODY)?
            .as_any()
            .downcast_ref::<RigidBody>()
    }

    pub fn rigid_body_mut(&mut self, id: ObjectID) -> Option<&mut RigidBody> {
        self.capability_mut(id, PHYSICS_BODY)?
            .as_any_mut()
            .downcast_mut::<RigidBody>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut world = World::new();
        world.spawn("Cube").unwrap();
        assert!(matches!(
            world.spawn("Cube"),
            Err(TreeError::DuplicateObject(name)) if name == "Cube"
        ));
    }

    #[test]
    fn rigid_body_lookup() {
        let mut world = World::new();
        let cube = world.spawn("Cube").unwrap();
        let empty = world.spawn("Empty").unwrap();
        world.add_rigid_body(cube, RigidBodyDesc::default()).unwrap();

        assert!(world.rigid_body(cube).is_some());
        assert!(world.rigid_body(empty).is_none());
        assert!(world.capability_mut(empty, PHYSICS_BODY).is_none());
    }

    #[test]
    fn despawn_detaches_capabilities() {
        let mut world = World::new();
        let cube = world.spawn("Cube").unwrap();
        world.add_rigid_body(cube, RigidBodyDesc::default()).unwrap();

        assert!(world.despawn(cube));
        assert!(!world.despawn(cube));
        assert!(world.rigid_body(cube).is_none());

        let again = world.spawn("Cube").unwrap();
        assert_ne!(again, cube);
        assert!(world.rigid_body(again).is_none());
    }

    #[test]
    fn attach_to_dead_object_fails() {
        let mut world = World::new();
        let cube = world.spawn("Cube").unwrap();
        world.despawn(cube);
        assert!(matches!(
            world.add_rigid_body(cube, RigidBodyDesc::default()),
            Err(TreeError::DeadObject(_))
        ));
    }
}

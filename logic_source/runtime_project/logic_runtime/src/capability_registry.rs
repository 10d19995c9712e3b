use logic_context::Capability;
use logic_ids::{CapabilityID, ObjectID};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Result, TreeError};

type CapabilityList = SmallVec<[Box<dyn Capability>; 2]>;

/// Capabilities attached to each object, keyed by [`CapabilityID`].
/// An object holds at most one capability per ID.
#[derive(Default)]
pub struct CapabilityRegistry {
    by_object: FxHashMap<ObjectID, CapabilityList>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, object: ObjectID, capability: Box<dyn Capability>) -> Result<()> {
        let id = capability.capability_id();
        let list = self.by_object.entry(object).or_default();
        if list.iter().any(|c| c.capability_id() == id) {
            return Err(TreeError::DuplicateCapability {
                object,
                capability: id,
            });
        }
        list.push(capability);
        Ok(())
    }

    pub fn get(&self, object: ObjectID, id: CapabilityID) -> Option<&dyn Capability> {
        let capability: &dyn Capability = self
            .by_object
            .get(&object)?
            .iter()
            .find(|c| c.capability_id() == id)?
            .as_ref();
        Some(capability)
    }

    pub fn get_mut(&mut self, object: ObjectID, id: CapabilityID) -> Option<&mut dyn Capability> {
        let capability: &mut dyn Capability = self
            .by_object
            .get_mut(&object)?
            .iter_mut()
            .find(|c| c.capability_id() == id)?
            .as_mut();
        Some(capability)
    }

    pub fn detach(&mut self, object: ObjectID, id: CapabilityID) -> Option<Box<dyn Capability>> {
        let list = self.by_object.get_mut(&object)?;
        let position = list.iter().position(|c| c.capability_id() == id)?;
        let removed = list.remove(position);
        if list.is_empty() {
            self.by_object.remove(&object);
        }
        Some(removed)
    }

    /// Drops every capability of `object`, returns how many were attached.
    pub fn detach_all(&mut self, object: ObjectID) -> usize {
        self.by_object
            .remove(&object)
            .map(|list| list.len())
            .unwrap_or(0)
    }

    pub fn count(&self, object: ObjectID) -> usize {
        self.by_object.get(&object).map(|list| list.len()).unwrap_or(0)
    }
}

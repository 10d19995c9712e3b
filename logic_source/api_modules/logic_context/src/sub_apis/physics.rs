use logic_ids::{CapabilityID, ObjectID};

use super::CapabilityAPI;

pub const PHYSICS_BODY_NAME: &str = "PhysicsBody";
pub const PHYSICS_BODY: CapabilityID = CapabilityID::from_name(PHYSICS_BODY_NAME);

/// Command surface of a simulated rigid body. Bodies ignore velocity writes
/// until [`PhysicsBody::activate`] has woken them.
pub trait PhysicsBody {
    fn activate(&mut self);
    fn set_linear_velocity(&mut self, x: f32, y: f32, z: f32);
    fn set_linear_factor(&mut self, x: f32, y: f32, z: f32);
    fn set_angular_velocity(&mut self, x: f32, y: f32, z: f32);
    fn set_angular_factor(&mut self, x: f32, y: f32, z: f32);
}

pub struct PhysicsModule<'rt, R: CapabilityAPI + ?Sized> {
    rt: &'rt mut R,
}

impl<'rt, R: CapabilityAPI + ?Sized> PhysicsModule<'rt, R> {
    pub fn new(rt: &'rt mut R) -> Self {
        Self { rt }
    }

    pub fn body_mut(&mut self, object: ObjectID) -> Option<&mut dyn PhysicsBody> {
        self.rt
            .capability_mut(object, PHYSICS_BODY)
            .and_then(|capability| capability.as_physics_body_mut())
    }
}

//! Recording context for node tests.

use std::any::Any;
use std::collections::HashMap;

use logic_context::{
    Capability, CapabilityAPI, LogicAPI, NodeError, PHYSICS_BODY, PhysicsBody, Result,
};
use logic_ids::{CapabilityID, ObjectID};
use logic_variant::Variant;

#[derive(Clone, Debug, PartialEq)]
pub enum BodyCall {
    Activate,
    LinearVelocity([f32; 3]),
    LinearFactor([f32; 3]),
    AngularVelocity([f32; 3]),
    AngularFactor([f32; 3]),
}

#[derive(Default)]
pub struct RecordingBody {
    pub calls: Vec<BodyCall>,
}

impl PhysicsBody for RecordingBody {
    fn activate(&mut self) {
        self.calls.push(BodyCall::Activate);
    }

    fn set_linear_velocity(&mut self, x: f32, y: f32, z: f32) {
        self.calls.push(BodyCall::LinearVelocity([x, y, z]));
    }

    fn set_linear_factor(&mut self, x: f32, y: f32, z: f32) {
        self.calls.push(BodyCall::LinearFactor([x, y, z]));
    }

    fn set_angular_velocity(&mut self, x: f32, y: f32, z: f32) {
        self.calls.push(BodyCall::AngularVelocity([x, y, z]));
    }

    fn set_angular_factor(&mut self, x: f32, y: f32, z: f32) {
        self.calls.push(BodyCall::AngularFactor([x, y, z]));
    }
}

impl Capability for RecordingBody {
    fn capability_id(&self) -> CapabilityID {
        PHYSICS_BODY
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_physics_body_mut(&mut self) -> Option<&mut dyn PhysicsBody> {
        Some(self)
    }
}

pub struct MockContext {
    pub inputs: Vec<Variant>,
    pub owner: ObjectID,
    pub bodies: HashMap<ObjectID, RecordingBody>,
    pub reads: Vec<usize>,
    pub continued: Vec<usize>,
}

impl MockContext {
    pub fn new(inputs: Vec<Variant>) -> Self {
        Self {
            inputs,
            owner: ObjectID::new(1),
            bodies: HashMap::new(),
            reads: Vec::new(),
            continued: Vec::new(),
        }
    }

    pub fn with_body(mut self, object: ObjectID) -> Self {
        self.bodies.insert(object, RecordingBody::default());
        self
    }

    pub fn calls(&self, object: ObjectID) -> &[BodyCall] {
        self.bodies
            .get(&object)
            .map(|body| body.calls.as_slice())
            .unwrap_or(&[])
    }
}

impl LogicAPI for MockContext {
    fn input(&mut self, slot: usize) -> Result<Variant> {
        self.reads.push(slot);
        self.inputs
            .get(slot)
            .cloned()
            .ok_or(NodeError::SlotOutOfRange {
                slot,
                count: self.inputs.len(),
            })
    }

    fn owner(&self) -> ObjectID {
        self.owner
    }

    fn run_output(&mut self, output: usize) {
        self.continued.push(output);
    }
}

impl CapabilityAPI for MockContext {
    fn capability_mut(
        &mut self,
        object: ObjectID,
        id: CapabilityID,
    ) -> Option<&mut dyn Capability> {
        if id != PHYSICS_BODY {
            return None;
        }
        self.bodies
            .get_mut(&object)
            .map(|body| body as &mut dyn Capability)
    }
}

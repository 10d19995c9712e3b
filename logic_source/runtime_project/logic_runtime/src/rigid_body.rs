//! In-memory rigid body: holds the commanded velocities and sleep state that
//! a physics backend would consume. Nothing here integrates motion.

use std::any::Any;

use logic_context::{Capability, PHYSICS_BODY, PhysicsBody};
use logic_ids::CapabilityID;
use logic_variant::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionShape {
    #[default]
    Box,
    Sphere,
    ConvexHull,
    Mesh,
    Cone,
    Cylinder,
    Capsule,
    StaticMesh,
}

impl CollisionShape {
    /// Numeric shape code used by exported scene data.
    pub const fn code(self) -> u8 {
        match self {
            CollisionShape::Box => 0,
            CollisionShape::Sphere => 1,
            CollisionShape::ConvexHull => 2,
            CollisionShape::Mesh => 3,
            CollisionShape::Cone => 4,
            CollisionShape::Cylinder => 5,
            CollisionShape::Capsule => 6,
            CollisionShape::StaticMesh => 8,
        }
    }
}

/// Rigid body parameters as authored on the object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigidBodyDesc {
    /// 0 marks a static body
    pub mass: f32,
    pub shape: CollisionShape,
    pub friction: f32,
    pub restitution: f32,
    pub collision_margin: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Passive bodies are moved by animation, never by velocity.
    pub passive: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            mass: 1.0,
            shape: CollisionShape::Box,
            friction: 0.5,
            restitution: 0.0,
            collision_margin: 0.04,
            linear_damping: 0.04,
            angular_damping: 0.1,
            passive: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Active,
    Sleeping,
}

pub struct RigidBody {
    desc: RigidBodyDesc,
    activation: Activation,
    linear_velocity: Vector3,
    linear_factor: Vector3,
    angular_velocity: Vector3,
    angular_factor: Vector3,
    activations: u32,
    dropped_writes: u32,
}

/// Serializable snapshot of a body, for reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RigidBodyState {
    pub activation: Activation,
    pub dynamic: bool,
    pub linear_velocity: Vector3,
    pub linear_factor: Vector3,
    pub effective_linear_velocity: Vector3,
    pub angular_velocity: Vector3,
    pub angular_factor: Vector3,
    pub effective_angular_velocity: Vector3,
    pub activations: u32,
    pub dropped_writes: u32,
}

impl RigidBody {
    pub fn new(desc: RigidBodyDesc) -> Self {
        Self {
            desc,
            activation: Activation::Active,
            linear_velocity: Vector3::ZERO,
            linear_factor: Vector3::ONE,
            angular_velocity: Vector3::ZERO,
            angular_factor: Vector3::ONE,
            activations: 0,
            dropped_writes: 0,
        }
    }

    /// Static (mass 0) and passive bodies never take velocity.
    pub fn is_dynamic(&self) -> bool {
        !self.desc.passive && self.desc.mass > 0.0
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Deactivates the body, as a backend does once it comes to rest.
    pub fn sleep(&mut self) {
        self.activation = Activation::Sleeping;
    }

    pub fn linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    pub fn linear_factor(&self) -> Vector3 {
        self.linear_factor
    }

    pub fn angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    pub fn angular_factor(&self) -> Vector3 {
        self.angular_factor
    }

    pub fn activations(&self) -> u32 {
        self.activations
    }

    pub fn dropped_writes(&self) -> u32 {
        self.dropped_writes
    }

    pub fn state(&self) -> RigidBodyState {
        RigidBodyState {
            activation: self.activation,
            dynamic: self.is_dynamic(),
            linear_velocity: self.linear_velocity,
            linear_factor: self.linear_factor,
            effective_linear_velocity: self.linear_velocity.scale_by(self.linear_factor),
            angular_velocity: self.angular_velocity,
            angular_factor: self.angular_factor,
            effective_angular_velocity: self.angular_velocity.scale_by(self.angular_factor),
            activations: self.activations,
            dropped_writes: self.dropped_writes,
        }
    }

    fn accepts_writes(&self) -> bool {
        self.is_dynamic() && self.activation == Activation::Active
    }

    fn write(&mut self, what: &str, value: Vector3, apply: impl FnOnce(&mut Self, Vector3)) {
        if self.accepts_writes() {
            apply(self, value);
        } else {
            self.dropped_writes += 1;
            log::debug!(
                "rigid body ignored {what} = {value} (dynamic: {}, {:?})",
                self.is_dynamic(),
                self.activation
            );
        }
    }
}

impl PhysicsBody for RigidBody {
    fn activate(&mut self) {
        self.activations += 1;
        if self.is_dynamic() {
            self.activation = Activation::Active;
        }
    }

    fn set_linear_velocity(&mut self, x: f32, y: f32, z: f32) {
        self.write("linear_velocity", Vector3::new(x, y, z), |body, v| {
            body.linear_velocity = v
        });
    }

    fn set_linear_factor(&mut self, x: f32, y: f32, z: f32) {
        self.write("linear_factor", Vector3::new(x, y, z), |body, v| {
            body.linear_factor = v
        });
    }

    fn set_angular_velocity(&mut self, x: f32, y: f32, z: f32) {
        self.write("angular_velocity", Vector3::new(x, y, z), |body, v| {
            body.angular_velocity = v
        });
    }

    fn set_angular_factor(&mut self, x: f32, y: f32, z: f32) {
        self.write("angular_factor", Vector3::new(x, y, z), |body, v| {
            body.angular_factor = v
        });
    }
}

impl Capability for RigidBody {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_authoring_defaults() {
        let desc: RigidBodyDesc = serde_json::from_str("{}").unwrap();
        assert_eq!(desc, RigidBodyDesc::default());
        assert_eq!(desc.shape.code(), 0);
    }

    #[test]
    fn shape_codes() {
        let shape: CollisionShape = serde_json::from_str("\"static_mesh\"").unwrap();
        assert_eq!(shape.code(), 8);
        assert_eq!(CollisionShape::Capsule.code(), 6);
    }

    #[test]
    fn sleeping_body_drops_writes_until_activated() {
        let mut body = RigidBody::new(RigidBodyDesc::default());
        body.sleep();

        body.set_linear_velocity(1.0, 0.0, 0.0);
        assert_eq!(body.linear_velocity(), Vector3::ZERO);
        assert_eq!(body.dropped_writes(), 1);

        body.activate();
        body.set_linear_velocity(1.0, 0.0, 0.0);
        assert_eq!(body.activation(), Activation::Active);
        assert_eq!(body.linear_velocity(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn static_and_passive_bodies_ignore_velocity() {
        for desc in [
            RigidBodyDesc {
                mass: 0.0,
                ..Default::default()
            },
            RigidBodyDesc {
                passive: true,
                ..Default::default()
            },
        ] {
            let mut body = RigidBody::new(desc);
            body.activate();
            body.set_angular_velocity(0.0, 0.0, 3.0);
            assert!(!body.is_dynamic());
            assert_eq!(body.angular_velocity(), Vector3::ZERO);
            assert_eq!(body.dropped_writes(), 1);
        }
    }

    #[test]
    fn state_applies_factors() {
        let mut body = RigidBody::new(RigidBodyDesc::default());
        body.set_linear_velocity(2.0, 4.0, 6.0);
        body.set_linear_factor(1.0, 0.0, 0.5);

        let state = body.state();
        assert_eq!(state.effective_linear_velocity, Vector3::new(2.0, 0.0, 3.0));
        assert_eq!(state.effective_angular_velocity, Vector3::ZERO);
    }
}

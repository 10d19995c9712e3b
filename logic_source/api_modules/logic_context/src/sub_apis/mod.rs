mod capability;
mod logic;
mod physics;

pub use capability::{Capability, CapabilityAPI};
pub use logic::LogicAPI;
pub use physics::{PHYSICS_BODY, PHYSICS_BODY_NAME, PhysicsBody, PhysicsModule};

/// Everything a node may touch while it executes.
pub trait NodeContext: LogicAPI + CapabilityAPI {}

impl<T: LogicAPI + CapabilityAPI + ?Sized> NodeContext for T {}

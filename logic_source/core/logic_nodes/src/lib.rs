mod array_get;
mod node;
mod set_velocity;
mod support;

#[cfg(test)]
mod testing;

pub use array_get::{ArrayGetNode, resolve_index};
pub use logic_context::{NodeError, Result};
pub use node::{LogicNode, SocketDef, SocketKind};
pub use set_velocity::SetVelocityNode;
pub use support::PhysicsSupport;

//! Boundary between logic nodes and whatever runtime evaluates them.
//!
//! Nodes only see the traits in [`sub_apis`]; the runtime implements them.

mod error;
pub mod sub_apis;

pub use error::{NodeError, Result};
pub use sub_apis::{
    Capability, CapabilityAPI, LogicAPI, NodeContext, PHYSICS_BODY, PHYSICS_BODY_NAME,
    PhysicsBody, PhysicsModule,
};

mod capability_registry;
mod config;
mod error;
mod object_arena;
mod registry;
mod rigid_body;
mod runtime;
mod scene;
mod tree;
mod world;

pub use capability_registry::CapabilityRegistry;
pub use config::{LogSection, LogicConfig, PhysicsSection, RuntimeSection};
pub use error::{Result, TreeError};
pub use object_arena::{ObjectArena, SceneObject};
pub use registry::{BuildOptions, NodeCtor, NodeRegistry};
pub use rigid_body::{Activation, CollisionShape, RigidBody, RigidBodyDesc, RigidBodyState};
pub use runtime::LogicRuntime;
pub use scene::{NodeDesc, ObjectDesc, SceneDesc, TreeDesc};
pub use tree::{Link, LogicTree, LogicTreeBuilder, RunReport};
pub use world::World;

use logic_nodes::{ArrayGetNode, LogicNode, PhysicsSupport, SetVelocityNode};
use rustc_hash::FxHashMap;

use crate::{Result, TreeError};

/// Settings fixed into nodes when a tree is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub physics: PhysicsSupport,
}

pub type NodeCtor = fn(&BuildOptions) -> Box<dyn LogicNode>;

/// Node type name -> constructor.
#[derive(Clone, Default)]
pub struct NodeRegistry {
    ctors: FxHashMap<&'static str, NodeCtor>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every node type this crate ships.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ArrayGetNode::TYPE_NAME, |_| Box::new(ArrayGetNode::new()));
        registry.register(SetVelocityNode::TYPE_NAME, |opts| {
            Box::new(SetVelocityNode::new(opts.physics))
        });
        registry
    }

    /// Registers `ctor` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, ctor: NodeCtor) {
        if self.ctors.insert(name, ctor).is_some() {
            log::warn!("node type `{name}` registered twice; keeping the latest");
        }
    }

    pub fn create(&self, name: &str, opts: &BuildOptions) -> Result<Box<dyn LogicNode>> {
        self.ctors
            .get(name)
            .map(|ctor| ctor(opts))
            .ok_or_else(|| TreeError::UnknownNodeType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ctors.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_types() {
        let registry = NodeRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["ArrayGetNode", "SetVelocityNode"]);

        let opts = BuildOptions::default();
        let node = registry.create("ArrayGetNode", &opts).unwrap();
        assert_eq!(node.type_name(), "ArrayGetNode");
        assert_eq!(node.inputs().len(), 2);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = NodeRegistry::with_builtin();
        assert!(matches!(
            registry.create("SetPositionNode", &BuildOptions::default()),
            Err(TreeError::UnknownNodeType(name)) if name == "SetPositionNode"
        ));
    }

    #[test]
    fn custom_registration() {
        let mut registry = NodeRegistry::new();
        assert!(!registry.contains("Get"));
        registry.register("Get", |_| Box::new(ArrayGetNode::new()));
        let node = registry.create("Get", &BuildOptions::default()).unwrap();
        assert_eq!(node.type_name(), ArrayGetNode::TYPE_NAME);
    }
}

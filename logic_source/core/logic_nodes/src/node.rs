use logic_context::{NodeContext, NodeError, Result};
use logic_variant::Variant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SocketKind {
    /// Execution flow ("In"/"Out")
    Action,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocketDef {
    pub name: &'static str,
    pub kind: SocketKind,
}

impl SocketDef {
    pub const fn action(name: &'static str) -> Self {
        Self {
            name,
            kind: SocketKind::Action,
        }
    }

    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: SocketKind::Value,
        }
    }
}

/// A node as seen by the tree evaluator. Nodes hold no state between calls;
/// everything they need is pulled through the context.
pub trait LogicNode {
    fn type_name(&self) -> &'static str;

    fn inputs(&self) -> &'static [SocketDef];

    fn outputs(&self) -> &'static [SocketDef];

    /// Computes value output `output`.
    fn get(&self, _ctx: &mut dyn NodeContext, _output: usize) -> Result<Variant> {
        Err(NodeError::NotAValueNode {
            node_type: self.type_name(),
        })
    }

    /// Executes the node when the chain reaches it.
    fn run(&self, _ctx: &mut dyn NodeContext) -> Result<()> {
        Err(NodeError::NotAnActionNode {
            node_type: self.type_name(),
        })
    }
}

use logic_ids::{NodeID, ObjectID};
use logic_variant::TypeMismatch;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NodeError>;

/// Failures raised while a node reads its inputs or executes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("object {object} has no {capability} capability")]
    MissingCapability {
        object: ObjectID,
        capability: &'static str,
    },

    #[error("input slot {slot}: {source}")]
    TypeMismatch {
        slot: usize,
        #[source]
        source: TypeMismatch,
    },

    #[error("input slot {slot} out of range ({count} inputs)")]
    SlotOutOfRange { slot: usize, count: usize },

    #[error("node has no output {output}")]
    NoSuchOutput { output: usize },

    #[error("{node_type} does not produce values")]
    NotAValueNode { node_type: &'static str },

    #[error("{node_type} cannot be run as an action")]
    NotAnActionNode { node_type: &'static str },

    #[error("upstream node {node} failed: {source}")]
    Upstream {
        node: NodeID,
        #[source]
        source: Box<NodeError>,
    },
}

impl NodeError {
    pub fn type_mismatch(slot: usize, source: TypeMismatch) -> Self {
        NodeError::TypeMismatch { slot, source }
    }
}

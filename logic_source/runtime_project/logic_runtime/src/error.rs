use logic_context::NodeError;
use logic_ids::{CapabilityID, NodeID, ObjectID};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("unknown node type `{0}`")]
    UnknownNodeType(String),

    #[error("unknown node `{0}`")]
    UnknownNodeKey(String),

    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("node {0} does not exist")]
    InvalidNode(NodeID),

    #[error("unknown object `{0}`")]
    UnknownObject(String),

    #[error("duplicate object name `{0}`")]
    DuplicateObject(String),

    #[error("object {0} does not exist")]
    DeadObject(ObjectID),

    #[error("object {object} already has capability {capability}")]
    DuplicateCapability {
        object: ObjectID,
        capability: CapabilityID,
    },

    #[error("no tree named `{0}`")]
    UnknownTree(String),

    #[error("node {node} ({node_type}) has no input slot {slot}")]
    NoSuchInput {
        node: NodeID,
        node_type: &'static str,
        slot: usize,
    },

    #[error("node {node} ({node_type}) has no output {output}")]
    NoSuchOutput {
        node: NodeID,
        node_type: &'static str,
        output: usize,
    },

    #[error("socket mismatch at node {node}: {reason}")]
    SocketMismatch { node: NodeID, reason: String },

    #[error("bad input for node `{node}` slot {slot}: {reason}")]
    BadInput {
        node: String,
        slot: usize,
        reason: String,
    },

    #[error("value links form a cycle through node {0}")]
    ValueCycle(NodeID),

    #[error("tree `{tree}`: node {node} ({node_type}) failed: {source}")]
    Node {
        tree: String,
        node: NodeID,
        node_type: &'static str,
        #[source]
        source: NodeError,
    },

    #[error("tree `{tree}` exceeded {limit} steps")]
    StepLimit { tree: String, limit: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

//! Logic tree storage and the chain runner.
//!
//! Value inputs are pulled recursively from linked nodes each time a node asks
//! for them. Action outputs push their targets on a work stack, so a chain
//! runs depth-first in connection order.

use logic_context::{Capability, CapabilityAPI, LogicAPI, NodeError};
use logic_ids::{CapabilityID, NodeID, ObjectID};
use logic_nodes::{LogicNode, SocketKind};
use logic_variant::Variant;
use smallvec::SmallVec;

use crate::world::World;
use crate::{Result, TreeError};

/// Where an input slot gets its value from.
#[derive(Clone, Debug, PartialEq)]
pub enum Link {
    Constant(Variant),
    Node { node: NodeID, output: usize },
}

struct NodeEntry {
    key: String,
    node: Box<dyn LogicNode>,
    inputs: Vec<Link>,
    outputs: Vec<SmallVec<[NodeID; 2]>>,
}

pub struct LogicTree {
    name: String,
    owner: ObjectID,
    nodes: Vec<NodeEntry>,
    entries: Vec<NodeID>,
}

/// Action nodes executed by one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub executed: Vec<NodeID>,
}

// Node IDs are 1-based so the nil ID never names a node.
#[inline]
fn node_id(index: usize) -> NodeID {
    NodeID::new(index as u32 + 1)
}

#[inline]
fn node_index(id: NodeID) -> Option<usize> {
    (id.index() as usize).checked_sub(1)
}

impl LogicTree {
    pub fn builder(name: impl Into<String>, owner: ObjectID) -> LogicTreeBuilder {
        LogicTreeBuilder {
            tree: LogicTree {
                name: name.into(),
                owner,
                nodes: Vec::new(),
                entries: Vec::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> ObjectID {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_id(&self, key: &str) -> Option<NodeID> {
        self.nodes
            .iter()
            .position(|entry| entry.key == key)
            .map(node_id)
    }

    pub fn node_type(&self, id: NodeID) -> Option<&'static str> {
        self.entry(id).ok().map(|entry| entry.node.type_name())
    }

    fn entry(&self, id: NodeID) -> Result<&NodeEntry> {
        if id.generation() != 0 {
            return Err(TreeError::InvalidNode(id));
        }
        node_index(id)
            .and_then(|index| self.nodes.get(index))
            .ok_or(TreeError::InvalidNode(id))
    }

    fn node_error(&self, node: NodeID, source: NodeError) -> TreeError {
        TreeError::Node {
            tree: self.name.clone(),
            node,
            node_type: self.node_type(node).unwrap_or("?"),
            source,
        }
    }

    /// Pulls value output `output` of `node` outside of any chain.
    pub fn evaluate(&self, world: &mut World, node: NodeID, output: usize) -> Result<Variant> {
        let entry = self.entry(node)?;
        let mut pending = Vec::new();
        let mut ctx = TreeContext {
            tree: self,
            world,
            node,
            pending: &mut pending,
        };
        entry
            .node
            .get(&mut ctx, output)
            .map_err(|source| self.node_error(node, source))
    }

    /// Runs every entry node in order.
    pub fn run(&self, world: &mut World, max_steps: usize) -> Result<RunReport> {
        let mut report = RunReport::default();
        for &entry in &self.entries {
            let part = self.run_from(world, entry, max_steps)?;
            report.executed.extend(part.executed);
        }
        Ok(report)
    }

    /// Runs the chain starting at `start` until no continuation is pending.
    /// A node error aborts the chain: nothing after the failing node runs.
    pub fn run_from(&self, world: &mut World, start: NodeID, max_steps: usize) -> Result<RunReport> {
        self.entry(start)?;

        let mut pending = vec![start];
        let mut report = RunReport::default();

        while let Some(id) = pending.pop() {
            if report.executed.len() >= max_steps {
                return Err(TreeError::StepLimit {
                    tree: self.name.clone(),
                    limit: max_steps,
                });
            }

            let entry = self.entry(id)?;
            log::debug!("[{}] run {} `{}`", self.name, entry.node.type_name(), entry.key);

            let mut ctx = TreeContext {
                tree: self,
                world: &mut *world,
                node: id,
                pending: &mut pending,
            };
            if let Err(source) = entry.node.run(&mut ctx) {
                log::error!(
                    "[{}] {} `{}` failed, chain aborted: {source}",
                    self.name,
                    entry.node.type_name(),
                    entry.key
                );
                return Err(self.node_error(id, source));
            }
            report.executed.push(id);
        }

        Ok(report)
    }
}

/// Context handed to a node while it runs or produces a value.
struct TreeContext<'a> {
    tree: &'a LogicTree,
    world: &'a mut World,
    node: NodeID,
    pending: &'a mut Vec<NodeID>,
}

impl<'a> TreeContext<'a> {
    fn current(&self) -> &'a NodeEntry {
        let tree = self.tree;
        // IDs handed to a context always come from the tree itself.
        &tree.nodes[node_index(self.node).unwrap_or_default()]
    }
}

impl LogicAPI for TreeContext<'_> {
    fn input(&mut self, slot: usize) -> logic_context::Result<Variant> {
        let tree = self.tree;
        let entry = self.current();
        match entry.inputs.get(slot) {
            None => Err(NodeError::SlotOutOfRange {
                slot,
                count: entry.inputs.len(),
            }),
            Some(Link::Constant(value)) => Ok(value.clone()),
            Some(&Link::Node { node, output }) => {
                let upstream = &tree.nodes[node_index(node).unwrap_or_default()];
                let mut ctx = TreeContext {
                    tree,
                    world: &mut *self.world,
                    node,
                    pending: &mut *self.pending,
                };
                upstream
                    .node
                    .get(&mut ctx, output)
                    .map_err(|source| NodeError::Upstream {
                        node,
                        source: Box::new(source),
                    })
            }
        }
    }

    fn owner(&self) -> ObjectID {
        self.tree.owner
    }

    fn run_output(&mut self, output: usize) {
        let entry = self.current();
        let Some(targets) = entry.outputs.get(output) else {
            log::warn!(
                "[{}] {} has no output {output}",
                self.tree.name,
                entry.node.type_name()
            );
            return;
        };
        // Popped from the back, so the first connection runs first.
        self.pending.extend(targets.iter().rev().copied());
    }
}

impl CapabilityAPI for TreeContext<'_> {
    fn capability_mut(
        &mut self,
        object: ObjectID,
        id: CapabilityID,
    ) -> Option<&mut dyn Capability> {
        self.world.capability_mut(object, id)
    }
}

/// Assembles a [`LogicTree`], checking every link against the node sockets.
pub struct LogicTreeBuilder {
    tree: LogicTree,
}

impl LogicTreeBuilder {
    pub fn add(&mut self, key: impl Into<String>, node: Box<dyn LogicNode>) -> Result<NodeID> {
        let key = key.into();
        if self.tree.node_id(&key).is_some() {
            return Err(TreeError::DuplicateNode(key));
        }
        let inputs = vec![Link::Constant(Variant::Null); node.inputs().len()];
        let outputs = vec![SmallVec::new(); node.outputs().len()];
        self.tree.nodes.push(NodeEntry {
            key,
            node,
            inputs,
            outputs,
        });
        Ok(node_id(self.tree.nodes.len() - 1))
    }

    pub fn node_id(&self, key: &str) -> Option<NodeID> {
        self.tree.node_id(key)
    }

    pub fn node_type(&self, id: NodeID) -> Option<&'static str> {
        self.tree.node_type(id)
    }

    fn input_kind(&self, node: NodeID, slot: usize) -> Result<SocketKind> {
        let entry = self.tree.entry(node)?;
        entry
            .node
            .inputs()
            .get(slot)
            .map(|socket| socket.kind)
            .ok_or(TreeError::NoSuchInput {
                node,
                node_type: entry.node.type_name(),
                slot,
            })
    }

    fn output_kind(&self, node: NodeID, output: usize) -> Result<SocketKind> {
        let entry = self.tree.entry(node)?;
        entry
            .node
            .outputs()
            .get(output)
            .map(|socket| socket.kind)
            .ok_or(TreeError::NoSuchOutput {
                node,
                node_type: entry.node.type_name(),
                output,
            })
    }

    fn set_link(&mut self, node: NodeID, slot: usize, link: Link) -> Result<()> {
        if self.input_kind(node, slot)? != SocketKind::Value {
            return Err(TreeError::SocketMismatch {
                node,
                reason: format!("input {slot} is an action socket"),
            });
        }
        let index = node_index(node).ok_or(TreeError::InvalidNode(node))?;
        self.tree.nodes[index].inputs[slot] = link;
        Ok(())
    }

    /// Sets a constant on a value input.
    pub fn set_input(&mut self, node: NodeID, slot: usize, value: Variant) -> Result<()> {
        self.set_link(node, slot, Link::Constant(value))
    }

    /// Feeds value output `output` of `from` into input `slot` of `to`.
    pub fn link(&mut self, from: NodeID, output: usize, to: NodeID, slot: usize) -> Result<()> {
        if self.output_kind(from, output)? != SocketKind::Value {
            return Err(TreeError::SocketMismatch {
                node: from,
                reason: format!("output {output} is an action socket"),
            });
        }
        self.set_link(to, slot, Link::Node { node: from, output })
    }

    /// Continues the chain from action output `output` of `from` into `to`.
    pub fn connect(&mut self, from: NodeID, output: usize, to: NodeID) -> Result<()> {
        if self.output_kind(from, output)? != SocketKind::Action {
            return Err(TreeError::SocketMismatch {
                node: from,
                reason: format!("output {output} is a value socket"),
            });
        }
        self.require_action_input(to)?;
        let index = node_index(from).ok_or(TreeError::InvalidNode(from))?;
        self.tree.nodes[index].outputs[output].push(to);
        Ok(())
    }

    /// Marks `node` as a chain start.
    pub fn entry(&mut self, node: NodeID) -> Result<()> {
        self.require_action_input(node)?;
        if !self.tree.entries.contains(&node) {
            self.tree.entries.push(node);
        }
        Ok(())
    }

    fn require_action_input(&self, node: NodeID) -> Result<()> {
        let entry = self.tree.entry(node)?;
        let runnable = entry
            .node
            .inputs()
            .iter()
            .any(|socket| socket.kind == SocketKind::Action);
        if runnable {
            Ok(())
        } else {
            Err(TreeError::SocketMismatch {
                node,
                reason: format!("{} has no action input", entry.node.type_name()),
            })
        }
    }

    pub fn build(self) -> Result<LogicTree> {
        self.check_value_cycles()?;
        Ok(self.tree)
    }

    /// Value links must form a DAG, otherwise pulling an input never ends.
    fn check_value_cycles(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(nodes: &[NodeEntry], marks: &mut [Mark], index: usize) -> Result<()> {
            match marks[index] {
                Mark::Done => return Ok(()),
                Mark::InProgress => return Err(TreeError::ValueCycle(node_id(index))),
                Mark::Unvisited => {}
            }
            marks[index] = Mark::InProgress;
            for link in &nodes[index].inputs {
                if let Link::Node { node, .. } = link {
                    if let Some(upstream) = node_index(*node) {
                        visit(nodes, marks, upstream)?;
                    }
                }
            }
            marks[index] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.tree.nodes.len()];
        for index in 0..self.tree.nodes.len() {
            visit(&self.tree.nodes, &mut marks, index)?;
        }
        Ok(())
    }
}

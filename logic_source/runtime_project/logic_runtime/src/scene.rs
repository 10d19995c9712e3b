//! JSON scene description: objects, their rigid bodies, and the logic trees
//! attached to them.
//!
//! Node inputs are plain JSON constants, or single-key tagged objects:
//! `{"vec3": [x, y, z]}`, `{"vec4": [x, y, z, w]}`, `{"object": "Name"}` and
//! `{"link": {"node": "id", "output": 0}}`. Tags also apply inside arrays,
//! except `link`.

use std::path::Path;

use logic_ids::{NodeID, ObjectID};
use logic_variant::{Variant, Vector3, Vector4};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::registry::{BuildOptions, NodeRegistry};
use crate::rigid_body::RigidBodyDesc;
use crate::tree::LogicTree;
use crate::world::World;
use crate::{Result, TreeError};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct SceneDesc {
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
    #[serde(default)]
    pub trees: Vec<TreeDesc>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ObjectDesc {
    pub name: String,
    #[serde(default)]
    pub rigid_body: Option<RigidBodyDesc>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TreeDesc {
    pub name: String,
    /// Name of the object the tree is attached to.
    pub owner: String,
    #[serde(default)]
    pub nodes: Vec<NodeDesc>,
    /// Node ids whose chains run when the tree runs.
    #[serde(default)]
    pub entry: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct NodeDesc {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// One entry per input slot; missing trailing entries stay null.
    #[serde(default)]
    pub inputs: Vec<JsonValue>,
    /// Continuation targets (node ids) per output.
    #[serde(default)]
    pub outputs: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedInput {
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Object(String),
    Link(LinkDesc),
}

#[derive(Deserialize)]
struct LinkDesc {
    node: String,
    #[serde(default)]
    output: usize,
}

const TAGS: [&str; 4] = ["vec3", "vec4", "object", "link"];

enum InputDesc {
    Constant(Variant),
    Link { node: String, output: usize },
}

fn tagged(value: &JsonValue) -> Option<std::result::Result<TaggedInput, serde_json::Error>> {
    let JsonValue::Object(map) = value else {
        return None;
    };
    if map.len() != 1 || !map.keys().all(|k| TAGS.contains(&k.as_str())) {
        return None;
    }
    Some(TaggedInput::deserialize(value))
}

fn parse_constant(value: &JsonValue, world: &World) -> std::result::Result<Variant, String> {
    if let Some(tag) = tagged(value) {
        return match tag.map_err(|e| e.to_string())? {
            TaggedInput::Vec3(v) => Ok(Variant::Vector3(Vector3::from(v))),
            TaggedInput::Vec4(v) => Ok(Variant::Vector4(Vector4::from(v))),
            TaggedInput::Object(name) => world
                .find(&name)
                .map(Variant::ObjectID)
                .ok_or_else(|| format!("unknown object `{name}`")),
            TaggedInput::Link(_) => Err("links cannot be nested in constants".to_string()),
        };
    }
    match value {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| parse_constant(item, world))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Variant::Array),
        other => Ok(Variant::from_json_value(other.clone())),
    }
}

fn parse_input(value: &JsonValue, world: &World) -> std::result::Result<InputDesc, String> {
    if let Some(Ok(TaggedInput::Link(link))) = tagged(value) {
        return Ok(InputDesc::Link {
            node: link.node,
            output: link.output,
        });
    }
    parse_constant(value, world).map(InputDesc::Constant)
}

impl SceneDesc {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Spawns the objects, then builds every tree against them.
    pub fn instantiate(
        &self,
        registry: &NodeRegistry,
        opts: &BuildOptions,
    ) -> Result<(World, Vec<LogicTree>)> {
        let mut world = World::new();
        for object in &self.objects {
            let id = world.spawn(object.name.as_str())?;
            if let Some(desc) = &object.rigid_body {
                world.add_rigid_body(id, desc.clone())?;
            }
        }

        let trees = self
            .trees
            .iter()
            .map(|tree| tree.build(&world, registry, opts))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "scene loaded: {} objects, {} trees",
            self.objects.len(),
            trees.len()
        );
        Ok((world, trees))
    }
}

impl TreeDesc {
    pub fn build(
        &self,
        world: &World,
        registry: &NodeRegistry,
        opts: &BuildOptions,
    ) -> Result<LogicTree> {
        let owner: ObjectID = world
            .find(&self.owner)
            .ok_or_else(|| TreeError::UnknownObject(self.owner.clone()))?;
        let mut builder = LogicTree::builder(self.name.as_str(), owner);

        // All nodes first, so links may point forward.
        let mut ids = Vec::with_capacity(self.nodes.len());
        for desc in &self.nodes {
            let node = registry.create(&desc.node_type, opts)?;
            ids.push(builder.add(desc.id.as_str(), node)?);
        }

        let resolve = |key: &str| {
            builder
                .node_id(key)
                .ok_or_else(|| TreeError::UnknownNodeKey(key.to_string()))
        };
        let mut wiring = Vec::new();
        for (desc, &id) in self.nodes.iter().zip(&ids) {
            for (slot, value) in desc.inputs.iter().enumerate() {
                if value.is_null() {
                    continue;
                }
                let input = parse_input(value, world).map_err(|reason| TreeError::BadInput {
                    node: desc.id.clone(),
                    slot,
                    reason,
                })?;
                wiring.push(match input {
                    InputDesc::Constant(value) => Wire::Constant { id, slot, value },
                    InputDesc::Link { node, output } => Wire::Link {
                        from: resolve(&node)?,
                        output,
                        to: id,
                        slot,
                    },
                });
            }
            for (output, targets) in desc.outputs.iter().enumerate() {
                for target in targets {
                    wiring.push(Wire::Next {
                        from: id,
                        output,
                        to: resolve(target)?,
                    });
                }
            }
        }
        let entries = self
            .entry
            .iter()
            .map(|key| resolve(key))
            .collect::<Result<Vec<_>>>()?;

        for wire in wiring {
            match wire {
                Wire::Constant { id, slot, value } => builder.set_input(id, slot, value)?,
                Wire::Link {
                    from,
                    output,
                    to,
                    slot,
                } => builder.link(from, output, to, slot)?,
                Wire::Next { from, output, to } => builder.connect(from, output, to)?,
            }
        }
        for entry in entries {
            builder.entry(entry)?;
        }
        builder.build()
    }
}

enum Wire {
    Constant {
        id: NodeID,
        slot: usize,
        value: Variant,
    },
    Link {
        from: NodeID,
        output: usize,
        to: NodeID,
        slot: usize,
    },
    Next {
        from: NodeID,
        output: usize,
        to: NodeID,
    },
}

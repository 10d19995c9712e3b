use logic_ids::ObjectID;

use crate::config::LogicConfig;
use crate::registry::{BuildOptions, NodeRegistry};
use crate::rigid_body::RigidBodyState;
use crate::scene::SceneDesc;
use crate::tree::{LogicTree, RunReport};
use crate::world::World;
use crate::{Result, TreeError};

/// A loaded scene: the world and every logic tree attached to its objects.
pub struct LogicRuntime {
    world: World,
    trees: Vec<LogicTree>,
    max_steps: usize,
}

impl LogicRuntime {
    pub fn new(world: World, trees: Vec<LogicTree>, max_steps: usize) -> Self {
        Self {
            world,
            trees,
            max_steps,
        }
    }

    pub fn from_scene(scene: &SceneDesc, config: &LogicConfig) -> Result<Self> {
        Self::from_scene_with(scene, config, &NodeRegistry::with_builtin())
    }

    pub fn from_scene_with(
        scene: &SceneDesc,
        config: &LogicConfig,
        registry: &NodeRegistry,
    ) -> Result<Self> {
        let opts = BuildOptions {
            physics: config.physics_support(),
        };
        log::debug!("building trees with {:?}", opts.physics);
        let (world, trees) = scene.instantiate(registry, &opts)?;
        Ok(Self::new(world, trees, config.runtime.max_steps))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn trees(&self) -> &[LogicTree] {
        &self.trees
    }

    /// Runs the entry chains of the tree called `name`.
    pub fn run_tree(&mut self, name: &str) -> Result<RunReport> {
        let tree = self
            .trees
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| TreeError::UnknownTree(name.to_string()))?;
        tree.run(&mut self.world, self.max_steps)
    }

    /// Runs every tree once, in scene order. Stops at the first failure.
    pub fn run_all(&mut self) -> Result<RunReport> {
        let mut report = RunReport::default();
        for tree in &self.trees {
            let part = tree.run(&mut self.world, self.max_steps)?;
            report.executed.extend(part.executed);
        }
        Ok(report)
    }

    /// Name and state of every object carrying a rigid body.
    pub fn body_states(&self) -> Vec<(String, ObjectID, RigidBodyState)> {
        self.world
            .objects()
            .filter_map(|(id, object)| {
                let body = self.world.rigid_body(id)?;
                Some((object.name.clone(), id, body.state()))
            })
            .collect()
    }
}

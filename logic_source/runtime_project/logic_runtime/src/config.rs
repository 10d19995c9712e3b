//! `logic.toml` runtime settings. Every section and key is optional.

use std::io;
use std::path::Path;

use logic_nodes::PhysicsSupport;
use serde::Deserialize;

use crate::{Result, TreeError};

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LogicConfig {
    #[serde(default)]
    pub physics: PhysicsSection,
    #[serde(default)]
    pub log: LogSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
}

/// `[physics]` section
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PhysicsSection {
    /// Unset follows the build (`physics` feature).
    pub enabled: Option<bool>,
}

/// `[log]` section
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LogSection {
    /// env_logger filter used when RUST_LOG is unset
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// `[runtime]` section
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeSection {
    /// Nodes one chain may execute before it is stopped. Must be at least 1.
    pub max_steps: usize,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self { max_steps: 4096 }
    }
}

impl LogicConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.runtime.max_steps == 0 {
            return Err(TreeError::InvalidConfig(
                "[runtime] max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn physics_support(&self) -> PhysicsSupport {
        PhysicsSupport::resolve(self.physics.enabled)
    }
}

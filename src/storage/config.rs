//! Node storage configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Malformed YAML or unknown field
    #[error("Invalid storage configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for a [`NodeStorage`](super::NodeStorage)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeStorageConfig {
    /// Human readable name, used in log output only
    pub name: Option<String>,
    /// Render typed literals of registered datatypes through the registry's
    /// `to_string`. Stored lexical forms are never rewritten.
    pub canonicalize_typed_literals: bool,
    /// Pre-allocated slots per kind arena
    pub initial_capacity: usize,
}

impl Default for NodeStorageConfig {
    fn default() -> Self {
        Self {
            name: None,
            canonicalize_typed_literals: true,
            initial_capacity: 64,
        }
    }
}

impl NodeStorageConfig {
    /// Named configuration with default tunables
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

//! File and environment configuration.
//!
//! Layers, lowest to highest: built-in defaults, the user config file, an
//! explicit config file, `TREEFORGE__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::engine::MissingParentPolicy;
use crate::logging::LoggingConfig;
use crate::render::{TreeSettings, ValidationResult};
use serde::{Deserialize, Serialize};

/// Engine behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Where local-mode create goes when the parent path does not resolve.
    #[serde(default)]
    pub missing_parent: MissingParentPolicy,
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub settings: TreeSettings,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ForgeConfig {
    pub fn validate(&self) -> ValidationResult {
        self.settings.validate()
    }
}

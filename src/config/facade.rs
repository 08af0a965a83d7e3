//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ForgeConfig;
use crate::error::SetupError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// The per-user config file (`<config dir>/treeforge/config.toml`).
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "treeforge", "treeforge")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load defaults, the user file, `explicit` if given, then environment.
    ///
    /// An explicit file must exist; the user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<ForgeConfig, SetupError> {
        validated(MergeService::load(Self::user_config_path().as_deref(), explicit)?)
    }

    /// Load a single file with environment overlay, skipping the user file.
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, SetupError> {
        validated(MergeService::load(None, Some(path))?)
    }

    /// Create default configuration.
    pub fn default() -> ForgeConfig {
        ForgeConfig::default()
    }
}

fn validated(config: ForgeConfig) -> Result<ForgeConfig, SetupError> {
    let validation = config.validate();
    if !validation.is_valid() {
        return Err(SetupError::Config(validation.errors.join("; ")));
    }
    Ok(config)
}

//! MergeService: orchestrates sources, applies merge policy, deserializes to ForgeConfig.

use crate::config::sources::{environment, file};
use crate::config::ForgeConfig;
use config::ConfigError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> user file -> explicit file -> environment (highest).
    pub fn load(user_file: Option<&Path>, explicit: Option<&Path>) -> Result<ForgeConfig, ConfigError> {
        let mut builder = builder_with_defaults()?;
        if let Some(path) = user_file {
            builder = file::add_to_builder(builder, path, false)?;
        }
        if let Some(path) = explicit {
            builder = file::add_to_builder(builder, path, true)?;
        }
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}

//! Merge policy and service.

pub mod service;

use crate::config::ForgeConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the serialized defaults so partial files deserialize.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&ForgeConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}

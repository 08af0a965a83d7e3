//! Environment variable source: TREEFORGE__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `TREEFORGE__SETTINGS__INDENT=4` sets `settings.indent`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TREEFORGE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}

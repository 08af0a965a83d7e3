//! Error types for the tree engine.

use thiserror::Error;

/// Error raised by a host-supplied hook or loader.
///
/// Hosts return whatever error they like; the engine only propagates it.
pub type HookError = anyhow::Error;

/// Construction-fatal errors. A `TreeForge` is never partially initialised.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid containerId: no mount point named {0:?}")]
    MissingContainer(String),

    #[error("Hosted mode requires a load callback")]
    MissingLoader,

    #[error("Editor element with id {0:?} not found")]
    MissingEditorElement(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors propagated from public operations.
///
/// Expected failures (empty names, unresolved paths, falsy hooks, declined
/// confirmations) are reported as `Ok(false)`; only host-thrown errors land here.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Hook {hook} failed: {source}")]
    Hook {
        hook: &'static str,
        #[source]
        source: HookError,
    },

    #[error("Tree load failed: {0}")]
    Load(#[source] HookError),
}

impl TreeError {
    pub(crate) fn hook(hook: &'static str, source: HookError) -> Self {
        TreeError::Hook { hook, source }
    }
}

/// Errors from logging initialisation and file configuration.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging already initialised: {0}")]
    LoggerAlreadySet(String),

    #[error(transparent)]
    ConfigSource(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Tooling & Integration Layer
//!
//! Terminal host: CLI commands and `dialoguer` dialogs.

pub mod cli;

pub use cli::{Cli, CliContext, CliError, Commands, TerminalUi};

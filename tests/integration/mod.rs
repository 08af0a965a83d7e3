//! Integration tests for the TreeForge tree engine

mod cli_local;
mod editor_flow;
mod hosted_mode;
mod interaction_flow;

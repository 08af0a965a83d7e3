//! TreeForge: Embeddable File/Folder Tree Engine
//!
//! Keeps a forest of files and folders, applies create/delete/rename either
//! directly (local mode) or through host hooks followed by a reload (hosted
//! mode), renders it for a mount point, and tracks the open file's unsaved
//! state. Presentation is reached only through the traits in [`surface`].

pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod host;
pub mod interaction;
pub mod logging;
pub mod render;
pub mod surface;
pub mod tooling;
pub mod tree;
pub mod types;

pub use engine::{DataSource, MissingParentPolicy, Mode, TreeForge, TreeForgeConfig};
pub use error::{BuildError, HookError, TreeError};
pub use hooks::{HookResult, TreeHooks, TreeLoader};
pub use interaction::{RenameOutcome, ToolbarAction, UiEvent};
pub use tree::{Forest, Node};

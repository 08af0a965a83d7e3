//! Presentation boundary.
//!
//! The engine never touches a presentation layer directly. It renders into a
//! [`TreeMount`], writes editor state into [`EditorElement`]s, and asks the
//! user through a [`UiAdapter`]. Several engine instances can share or own
//! separate surfaces.

pub mod memory;

pub use memory::{HeadlessUi, MemoryDocument, MemoryElement, MemoryMount, MountEvent, ScriptedUi};

use crate::render::NodeBinding;
use async_trait::async_trait;
use std::sync::Arc;

/// Screen position of a context menu request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuPosition {
    pub x: i32,
    pub y: i32,
}

/// Context menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextAction {
    NewFile,
    NewFolder,
    Rename,
    Delete,
}

impl ContextAction {
    pub const ALL: [ContextAction; 4] = [
        ContextAction::NewFile,
        ContextAction::NewFolder,
        ContextAction::Rename,
        ContextAction::Delete,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContextAction::NewFile => "New File",
            ContextAction::NewFolder => "New Folder",
            ContextAction::Rename => "Rename",
            ContextAction::Delete => "Delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub action: ContextAction,
    pub enabled: bool,
}

/// User dialogs and menus.
#[async_trait]
pub trait UiAdapter: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;

    /// `None` when the user cancels.
    async fn prompt_text(&self, title: &str, placeholder: &str, default: &str) -> Option<String>;

    fn show_context_menu(&self, position: MenuPosition, path: &str, items: &[MenuItem]);

    /// Put the rendered name of `path` into inline edit mode.
    fn begin_inline_rename(&self, _path: &str) {}
}

/// Mount point the rendered tree is written into.
pub trait TreeMount: Send + Sync {
    /// Replace the whole rendered subtree.
    fn replace_content(&self, markup: &str);

    /// Bind handlers to the freshly rendered elements. Bindings from earlier
    /// generations are dead.
    fn bind(&self, generation: u64, bindings: &[NodeBinding]);
}

/// A host element the editor writes to (input, label, indicator, panel).
pub trait EditorElement: Send + Sync {
    fn set_text(&self, text: &str);
    fn text(&self) -> String;
    fn set_visible(&self, visible: bool);
}

/// Element lookup by id.
pub trait Document: Send + Sync {
    fn mount(&self, container_id: &str) -> Option<Arc<dyn TreeMount>>;
    fn element(&self, id: &str) -> Option<Arc<dyn EditorElement>>;
}

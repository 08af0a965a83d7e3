//! Interaction surface
//!
//! Routes user events from a host surface to engine operations: node clicks,
//! inline rename, the per-node context menu, the toolbar and the editor
//! buttons. User-facing messages such as duplicate names are left to the
//! host; this layer only reports outcomes.

use crate::engine::{TreeForge, CLOSE_UNSAVED_PROMPT};
use crate::error::TreeError;
use crate::surface::{ContextAction, MenuItem, MenuPosition};
use crate::types::TreePath;
use tracing::debug;

/// Default name offered when creating a file.
pub const DEFAULT_FILE_NAME: &str = "newFile.js";

/// Default name offered when creating a folder.
pub const DEFAULT_FOLDER_NAME: &str = "newFolder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    NewFile,
    NewFolder,
    CollapseAll,
    ExpandAll,
    Refresh,
}

/// An input event from the rendered tree or editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Toggle a folder or open a file.
    NodeClick { path: String },
    /// Inline edit committed with `text`.
    InlineRename { path: String, text: String },
    /// Inline edit abandoned.
    InlineRenameCancel { path: String },
    ContextMenu { path: String, position: MenuPosition },
    /// Entry picked from the last context menu.
    ContextAction(ContextAction),
    Toolbar(ToolbarAction),
    /// The editor buffer was typed into.
    EditorInput,
    EditorSave,
    EditorClose,
}

/// Result of committing an inline rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// Empty or identical text; the view was re-rendered.
    Unchanged,
    /// A sibling already has the name; the view was re-rendered.
    Duplicate,
    /// The rename operation reported failure.
    Failed,
}

impl TreeForge {
    /// Route one event. Returns whether it changed anything.
    pub async fn dispatch(&self, event: UiEvent) -> Result<bool, TreeError> {
        match event {
            UiEvent::NodeClick { path } => self.click(&path).await,
            UiEvent::InlineRename { path, text } => self
                .inline_rename(&path, &text)
                .await
                .map(|outcome| outcome == RenameOutcome::Renamed),
            UiEvent::InlineRenameCancel { .. } => {
                self.rerender();
                Ok(false)
            }
            UiEvent::ContextMenu { path, position } => {
                self.show_context_menu(&path, position);
                Ok(false)
            }
            UiEvent::ContextAction(action) => self.context_action(action).await,
            UiEvent::Toolbar(action) => self.toolbar(action).await,
            UiEvent::EditorInput => Ok(self.buffer_changed()),
            UiEvent::EditorSave => self.save_current().await,
            UiEvent::EditorClose => Ok(self.request_close().await),
        }
    }

    /// Folders toggle, files open.
    pub async fn click(&self, path: &str) -> Result<bool, TreeError> {
        match self.node(path) {
            Some(node) if node.is_folder() => Ok(self.toggle(path)),
            Some(_) => self.open(path).await,
            None => Ok(false),
        }
    }

    /// Commit an inline rename, refusing names a sibling already has.
    pub async fn inline_rename(&self, path: &str, text: &str) -> Result<RenameOutcome, TreeError> {
        let new_name = text.trim();
        let old_name = match self.node(path) {
            Some(node) => node.name().to_string(),
            None => return Ok(RenameOutcome::Failed),
        };
        if new_name.is_empty() || new_name == old_name {
            self.rerender();
            return Ok(RenameOutcome::Unchanged);
        }
        let (parent, _) = TreePath::split_parent(path);
        if self.sibling_names(parent).iter().any(|name| name == new_name) {
            debug!(path, name = new_name, "Name already exists");
            self.rerender();
            return Ok(RenameOutcome::Duplicate);
        }
        if self.rename_node(path, new_name).await? {
            Ok(RenameOutcome::Renamed)
        } else {
            Ok(RenameOutcome::Failed)
        }
    }

    /// Remember `path` and ask the UI to show the node menu.
    ///
    /// Create entries are disabled on files.
    pub fn show_context_menu(&self, path: &str, position: MenuPosition) {
        self.select(path);
        let is_file = self.is_file(path);
        let items: Vec<MenuItem> = ContextAction::ALL
            .iter()
            .map(|&action| MenuItem {
                action,
                enabled: !(is_file && matches!(action, ContextAction::NewFile | ContextAction::NewFolder)),
            })
            .collect();
        self.ui().show_context_menu(position, path, &items);
    }

    /// Run a context menu entry against the selected path.
    pub async fn context_action(&self, action: ContextAction) -> Result<bool, TreeError> {
        let path = match self.selected_path() {
            Some(path) => path,
            None => return Ok(false),
        };
        match action {
            ContextAction::NewFile | ContextAction::NewFolder => {
                // Creating on a file targets its folder.
                let parent = if self.is_file(&path) {
                    TreePath::split_parent(&path).0.to_string()
                } else {
                    path
                };
                if self.is_file(&parent) {
                    return Ok(false);
                }
                self.prompt_and_create(&parent, action == ContextAction::NewFolder)
                    .await
            }
            ContextAction::Rename => {
                if self.node(&path).is_none() {
                    return Ok(false);
                }
                self.ui().begin_inline_rename(&path);
                Ok(false)
            }
            ContextAction::Delete => self.delete_node(&path).await,
        }
    }

    pub async fn toolbar(&self, action: ToolbarAction) -> Result<bool, TreeError> {
        match action {
            ToolbarAction::NewFile => self.prompt_and_create("", false).await,
            ToolbarAction::NewFolder => self.prompt_and_create("", true).await,
            ToolbarAction::CollapseAll => {
                self.set_all_collapsed(true);
                Ok(true)
            }
            ToolbarAction::ExpandAll => {
                self.set_all_collapsed(false);
                Ok(true)
            }
            ToolbarAction::Refresh => {
                self.refresh().await?;
                Ok(true)
            }
        }
    }

    async fn prompt_and_create(&self, parent: &str, folder: bool) -> Result<bool, TreeError> {
        let (title, placeholder, default) = if folder {
            ("Create New Folder", "Enter folder name...", DEFAULT_FOLDER_NAME)
        } else {
            ("Create New File", "Enter file name...", DEFAULT_FILE_NAME)
        };
        let name = match self.ui().prompt_text(title, placeholder, default).await {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Ok(false),
        };
        if folder {
            self.create_folder(parent, &name).await
        } else {
            self.create_file(parent, &name).await
        }
    }

    /// Close the editor, asking first when the open file has unsaved edits.
    pub async fn request_close(&self) -> bool {
        let dirty = self.editor_state().current_is_dirty();
        if dirty && !self.ui().confirm(CLOSE_UNSAVED_PROMPT).await {
            return false;
        }
        self.close();
        true
    }
}

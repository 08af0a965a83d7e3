//! Opening, editing and saving files.

use super::TreeForge;
use crate::error::TreeError;
use crate::tree::{resolve_node, Node};
use crate::types::TreePath;
use tracing::{debug, info, warn};

/// Asked before discarding unsaved edits by switching files.
pub const SWITCH_UNSAVED_PROMPT: &str = "You have unsaved changes. Switch files anyway?";

/// Asked before discarding unsaved edits by closing the editor.
pub const CLOSE_UNSAVED_PROMPT: &str = "You have unsaved changes. Close anyway?";

impl TreeForge {
    /// Open the file at `path` in the editor.
    ///
    /// Returns false when the path is not a file or the user keeps the
    /// current document. Re-opening the open file while it has unsaved
    /// edits keeps the buffer as it is.
    ///
    /// `on_file_open` runs once the switch is accepted and before content
    /// is loaded, so a declined switch never reports an open.
    pub async fn open(&self, path: &str) -> Result<bool, TreeError> {
        let node = match self.node(path) {
            Some(node) if node.is_file() => node,
            _ => {
                debug!(path, "Open target is not a file");
                return Ok(false);
            }
        };

        let (dirty, reopening) = {
            let editor = self.editor.lock();
            (editor.current_is_dirty(), editor.is_current(path))
        };
        if dirty && !reopening && !self.ui.confirm(SWITCH_UNSAVED_PROMPT).await {
            debug!(path, "Kept current document");
            return Ok(false);
        }

        if let Some(callback) = &self.on_file_open {
            callback(&node);
        }
        if dirty && reopening {
            debug!(path, "Already open with unsaved edits");
            return Ok(true);
        }

        let cached = self.editor.lock().cached(path).map(str::to_string);
        let content = match cached {
            Some(content) => content,
            None => match self.hooks.on_read_file(path, &node).await {
                Ok(Some(content)) => content,
                Ok(None) => match &node {
                    Node::File { content, .. } => content.clone().unwrap_or_default(),
                    Node::Folder { .. } => String::new(),
                },
                Err(e) => {
                    warn!(hook = "on_read_file", path, error = %e, "Read hook failed");
                    return Err(TreeError::hook("on_read_file", e));
                }
            },
        };

        // Last open to finish wins.
        let unsaved = {
            let mut editor = self.editor.lock();
            editor.opened(path, content.clone());
            editor.is_unsaved(path)
        };
        let (_, name) = TreePath::split_parent(path);
        self.panel.show_file(name, &content, unsaved);
        info!(path, "Opened");
        Ok(true)
    }

    /// Persist `content` for `path`.
    ///
    /// With a write hook the hook decides; without one the content is written
    /// onto the node, which must still exist.
    pub async fn save(&self, path: &str, content: &str) -> Result<bool, TreeError> {
        let hooked = self.hooks.on_write_file(path, content).await.map_err(|e| {
            warn!(hook = "on_write_file", path, error = %e, "Write hook failed");
            TreeError::hook("on_write_file", e)
        })?;
        match hooked {
            Some(true) => {}
            Some(false) => {
                debug!(path, "Write refused by host");
                return Ok(false);
            }
            None => {
                let written = {
                    let mut tree = self.tree.write();
                    match resolve_node(&tree, path) {
                        Some(id) => tree.set_content(id, content.to_string()),
                        None => false,
                    }
                };
                if !written {
                    debug!(path, "Save target is not a file");
                    return Ok(false);
                }
            }
        }

        let is_current = {
            let mut editor = self.editor.lock();
            editor.saved(path, content.to_string());
            editor.is_current(path)
        };
        if is_current {
            self.panel.set_unsaved(false);
        }
        info!(path, bytes = content.len(), "Saved");
        Ok(true)
    }

    /// Save the editor buffer to the open file.
    pub async fn save_current(&self) -> Result<bool, TreeError> {
        let current = self.current_file();
        match current {
            Some(path) => {
                let buffer = self.panel.buffer();
                self.save(&path, &buffer).await
            }
            None => Ok(false),
        }
    }

    /// Replace the buffer text as if the user typed it.
    pub fn edit_buffer(&self, text: &str) -> bool {
        if self.current_file().is_none() {
            return false;
        }
        self.panel.set_buffer(text);
        self.buffer_changed()
    }

    /// Record that the buffer was touched. Returns false with nothing open.
    pub fn buffer_changed(&self) -> bool {
        let touched = self.editor.lock().touch();
        if touched {
            self.panel.set_unsaved(true);
        }
        touched
    }

    /// Close the editor. Cached content and unsaved marks are kept.
    pub fn close(&self) {
        self.editor.lock().close();
        self.panel.reset();
        debug!("Editor closed");
    }
}

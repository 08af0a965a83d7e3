//! Editor / Unsaved-State Tracker
//!
//! Tracks the single open document, a per-path content cache, and the set of
//! paths whose buffer was touched since the last open or save. Entries are
//! keyed by path and follow renames and deletes by path prefix.

mod panel;

pub use panel::{BuiltInEditor, EditorElementIds, EditorPanel, EditorWiring, NO_FILE_SELECTED};

use crate::types::TreePath;
use std::collections::{BTreeSet, HashMap};

/// Open-document state owned by one engine instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    current: Option<String>,
    cache: HashMap<String, String>,
    unsaved: BTreeSet<String>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_current(&self, path: &str) -> bool {
        self.current.as_deref() == Some(path)
    }

    pub fn cached(&self, path: &str) -> Option<&str> {
        self.cache.get(path).map(String::as_str)
    }

    pub fn is_unsaved(&self, path: &str) -> bool {
        self.unsaved.contains(path)
    }

    pub fn unsaved_paths(&self) -> impl Iterator<Item = &str> {
        self.unsaved.iter().map(String::as_str)
    }

    /// True when the open document has unsaved edits.
    pub fn current_is_dirty(&self) -> bool {
        self.current
            .as_deref()
            .map(|path| self.unsaved.contains(path))
            .unwrap_or(false)
    }

    /// Commit a finished open.
    pub fn opened(&mut self, path: &str, content: String) {
        self.current = Some(path.to_string());
        self.cache.insert(path.to_string(), content);
    }

    /// Mark the open document as edited. Returns false with nothing open.
    pub fn touch(&mut self) -> bool {
        match &self.current {
            Some(path) => {
                self.unsaved.insert(path.clone());
                true
            }
            None => false,
        }
    }

    pub fn saved(&mut self, path: &str, content: String) {
        self.cache.insert(path.to_string(), content);
        self.unsaved.remove(path);
    }

    /// Drop the open path. Cache and unsaved entries stay keyed by path.
    pub fn close(&mut self) {
        self.current = None;
    }

    /// Remove every entry at or under `prefix`. Returns true if the open
    /// document was among them.
    pub fn purge(&mut self, prefix: &str) -> bool {
        self.cache.retain(|path, _| !TreePath::is_within(path, prefix));
        self.unsaved.retain(|path| !TreePath::is_within(path, prefix));
        match &self.current {
            Some(path) if TreePath::is_within(path, prefix) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Re-key every entry at or under `from` to live under `to`. Returns the
    /// new open path if the open document moved.
    pub fn rekey(&mut self, from: &str, to: &str) -> Option<String> {
        if from == to {
            return None;
        }
        let moved: Vec<(String, String)> = self
            .cache
            .keys()
            .filter_map(|path| TreePath::rebase(path, from, to).map(|new| (path.clone(), new)))
            .collect();
        for (old, new) in moved {
            if let Some(content) = self.cache.remove(&old) {
                self.cache.insert(new, content);
            }
        }
        let unsaved: Vec<String> = std::mem::take(&mut self.unsaved)
            .into_iter()
            .map(|path| TreePath::rebase(&path, from, to).unwrap_or(path))
            .collect();
        self.unsaved = unsaved.into_iter().collect();

        let moved_current = self
            .current
            .as_deref()
            .and_then(|path| TreePath::rebase(path, from, to));
        if let Some(new) = &moved_current {
            self.current = Some(new.clone());
        }
        moved_current
    }
}

//! Structural mutations: create, delete, rename.

use super::{MissingParentPolicy, Mode, TreeForge};
use crate::error::TreeError;
use crate::tree::{resolve, resolve_node, unique_name, NewNodeKind, Node, Target, Tree};
use crate::types::{TreePath, PATH_SEPARATOR};
use tracing::{debug, info, warn};

/// Whether `new_path` already names a node other than the one at `path`.
fn occupied_by_other(tree: &Tree, path: &str, new_path: &str) -> bool {
    match resolve_node(tree, new_path) {
        Some(other) => resolve_node(tree, path) != Some(other),
        None => false,
    }
}

/// Names that would break path addressing.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(PATH_SEPARATOR)
}

impl TreeForge {
    pub async fn create_file(&self, parent_path: &str, name: &str) -> Result<bool, TreeError> {
        self.create(parent_path, name, NewNodeKind::File).await
    }

    pub async fn create_folder(&self, parent_path: &str, name: &str) -> Result<bool, TreeError> {
        self.create(parent_path, name, NewNodeKind::Folder).await
    }

    async fn create(&self, parent_path: &str, name: &str, kind: NewNodeKind) -> Result<bool, TreeError> {
        if !is_valid_name(name) {
            debug!(parent = parent_path, name, "Rejected create with invalid name");
            return Ok(false);
        }
        match self.mode {
            Mode::Hosted => {
                let (hook, result) = match kind {
                    NewNodeKind::File => (
                        "on_create_file",
                        self.hooks.on_create_file(parent_path, name).await,
                    ),
                    NewNodeKind::Folder => (
                        "on_create_folder",
                        self.hooks.on_create_folder(parent_path, name).await,
                    ),
                };
                let accepted = result.map_err(|e| {
                    warn!(hook, parent = parent_path, name, error = %e, "Create hook failed");
                    TreeError::hook(hook, e)
                })?;
                if accepted != Some(true) {
                    debug!(hook, parent = parent_path, name, "Create not accepted by host");
                    return Ok(false);
                }
                self.refresh().await?;
                info!(parent = parent_path, name, "Created via host");
                Ok(true)
            }
            Mode::Local => {
                let created = {
                    let mut tree = self.tree.write();
                    let target = match (resolve(&tree, parent_path), self.missing_parent) {
                        (Some(target), _) => target,
                        (None, MissingParentPolicy::Root) => Target::Root,
                        (None, MissingParentPolicy::Fail) => {
                            debug!(parent = parent_path, "Parent path did not resolve");
                            return Ok(false);
                        }
                    };
                    if let Target::Node(id) = target {
                        if tree.get(id).map(|e| e.is_file()).unwrap_or(true) {
                            debug!(parent = parent_path, "Create target is a file");
                            return Ok(false);
                        }
                    }
                    let allocated = unique_name(&tree.child_names(target), name);
                    tree.insert_child(target, allocated.clone(), kind)
                        .and_then(|id| tree.path_of(id))
                        .map(|path| (allocated, path))
                };
                match created {
                    Some((allocated, path)) => {
                        self.rerender();
                        info!(path = %path, name = %allocated, "Created");
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
        }
    }

    /// Delete the node at `path` after one confirmation.
    pub async fn delete_node(&self, path: &str) -> Result<bool, TreeError> {
        let node = match self.node(path) {
            Some(node) => node,
            None => {
                debug!(path, "Delete target not found");
                return Ok(false);
            }
        };

        let confirmed = match &self.delete_confirm {
            Some(confirm) => confirm(node.name()),
            None => {
                self.ui
                    .confirm(&format!("Delete \"{}\"?", node.name()))
                    .await
            }
        };
        if !confirmed {
            debug!(path, "Delete declined");
            return Ok(false);
        }

        match self.mode {
            Mode::Hosted => {
                if !self.delete_via_hooks(path, &node).await? {
                    return Ok(false);
                }
                self.forget_editor_entries(path);
                self.refresh().await?;
                info!(path, "Deleted via host");
                Ok(true)
            }
            Mode::Local => {
                // Re-resolve: the node may have moved while the prompt was open.
                let removed = {
                    let mut tree = self.tree.write();
                    resolve_node(&tree, path).and_then(|id| tree.remove(id))
                };
                if removed.is_none() {
                    debug!(path, "Delete target vanished before confirmation resolved");
                    return Ok(false);
                }
                self.forget_editor_entries(path);
                self.rerender();
                info!(path, "Deleted");
                Ok(true)
            }
        }
    }

    async fn delete_via_hooks(&self, path: &str, node: &Node) -> Result<bool, TreeError> {
        let (hook, specific) = match node {
            Node::Folder { .. } => ("on_delete_folder", self.hooks.on_delete_folder(path, node).await),
            Node::File { .. } => ("on_delete_file", self.hooks.on_delete_file(path, node).await),
        };
        let specific = specific.map_err(|e| {
            warn!(hook, path, error = %e, "Delete hook failed");
            TreeError::hook(hook, e)
        })?;
        let accepted = match specific {
            Some(accepted) => accepted,
            None => self
                .hooks
                .on_delete_node(path, node)
                .await
                .map_err(|e| {
                    warn!(hook = "on_delete_node", path, error = %e, "Delete hook failed");
                    TreeError::hook("on_delete_node", e)
                })?
                .unwrap_or(false),
        };
        if !accepted {
            debug!(path, "Delete not accepted by host");
        }
        Ok(accepted)
    }

    fn forget_editor_entries(&self, path: &str) {
        let closed = self.editor.lock().purge(path);
        if closed {
            self.panel.reset();
        }
    }

    /// Rename the node at `path`. An empty `new_name` asks the rename prompt.
    ///
    /// Sibling uniqueness is not checked here.
    pub async fn rename_node(&self, path: &str, new_name: &str) -> Result<bool, TreeError> {
        let old_name = match self.node(path) {
            Some(node) => node.name().to_string(),
            None => {
                debug!(path, "Rename target not found");
                return Ok(false);
            }
        };

        let new_name = if new_name.is_empty() {
            self.rename_prompt
                .as_ref()
                .and_then(|prompt| prompt(&old_name))
                .unwrap_or_default()
        } else {
            new_name.to_string()
        };
        if !is_valid_name(&new_name) {
            debug!(path, name = %new_name, "Rejected rename with invalid name");
            return Ok(false);
        }

        let (parent, _) = TreePath::split_parent(path);
        let new_path = TreePath::join(parent, &new_name);

        match self.mode {
            Mode::Hosted => {
                let displaced = occupied_by_other(&self.tree.read(), path, &new_path);
                let accepted = self
                    .hooks
                    .on_rename_node(path, &new_name)
                    .await
                    .map_err(|e| {
                        warn!(hook = "on_rename_node", path, error = %e, "Rename hook failed");
                        TreeError::hook("on_rename_node", e)
                    })?;
                if accepted != Some(true) {
                    debug!(path, name = %new_name, "Rename not accepted by host");
                    return Ok(false);
                }
                self.follow_rename(path, &new_path, displaced);
                self.refresh().await?;
                info!(path, new_path = %new_path, "Renamed via host");
                Ok(true)
            }
            Mode::Local => {
                let (renamed, displaced) = {
                    let mut tree = self.tree.write();
                    let displaced = occupied_by_other(&tree, path, &new_path);
                    match resolve_node(&tree, path) {
                        Some(id) => (tree.rename(id, new_name.clone()), displaced),
                        None => (false, false),
                    }
                };
                if !renamed {
                    return Ok(false);
                }
                self.follow_rename(path, &new_path, displaced);
                self.rerender();
                info!(path, new_path = %new_path, "Renamed");
                Ok(true)
            }
        }
    }

    /// Re-key editor entries from `from` to `to`. When `to` named another
    /// node, that node's entries are dropped first so its draft is never
    /// saved onto the renamed one.
    fn follow_rename(&self, from: &str, to: &str, displaced: bool) {
        let (closed, moved) = {
            let mut editor = self.editor.lock();
            let closed = displaced && editor.purge(to);
            (closed, editor.rekey(from, to))
        };
        if closed {
            self.panel.reset();
        }
        if let Some(open) = moved {
            self.panel.set_filename(TreePath::split_parent(&open).1);
        }
    }
}

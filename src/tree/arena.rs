//! Arena-backed canonical tree.
//!
//! Every node lives in one map keyed by a generated [`NodeId`], with a parent
//! pointer and an ordered child list for folders. Paths are never stored; they
//! are derived by walking names, so a rename re-addresses a whole subtree.

use crate::tree::node::{Forest, Node};
use crate::types::{NodeId, TreePath};
use std::collections::HashMap;

/// Either the forest root or a concrete node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Root,
    Node(NodeId),
}

#[derive(Debug, Clone)]
enum EntryKind {
    Folder {
        children: Vec<NodeId>,
        collapsed: bool,
    },
    File {
        content: Option<String>,
    },
}

/// One arena slot.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    parent: Option<NodeId>,
    kind: EntryKind,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn collapsed(&self) -> bool {
        matches!(self.kind, EntryKind::Folder { collapsed: true, .. })
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { content } => content.as_deref(),
            EntryKind::Folder { .. } => None,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        if self.is_folder() {
            "folder"
        } else {
            "file"
        }
    }
}

/// Kind of node to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewNodeKind {
    File,
    Folder,
}

/// Canonical tree owned by one engine instance.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: HashMap<NodeId, Entry>,
    roots: Vec<NodeId>,
    /// Bumped on every in-place mutation.
    revision: u64,
    /// Bumped every time the whole forest is substituted.
    generation: u64,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_forest(forest: &[Node]) -> Self {
        let mut tree = Tree::new();
        tree.roots = tree.insert_all(forest, None);
        tree
    }

    fn insert_all(&mut self, nodes: &[Node], parent: Option<NodeId>) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = NodeId::new();
            let kind = match node {
                Node::Folder {
                    children,
                    collapsed,
                    ..
                } => {
                    let child_ids = self.insert_all(children, Some(id));
                    EntryKind::Folder {
                        children: child_ids,
                        collapsed: *collapsed,
                    }
                }
                Node::File { content, .. } => EntryKind::File {
                    content: content.clone(),
                },
            };
            self.entries.insert(
                id,
                Entry {
                    name: node.name().to_string(),
                    parent,
                    kind,
                },
            );
            ids.push(id);
        }
        ids
    }

    /// Substitute the whole forest. No merge: local annotations on the old
    /// tree are dropped.
    pub fn replace(&mut self, forest: &[Node]) {
        let generation = self.generation.wrapping_add(1);
        *self = Tree::from_forest(forest);
        self.generation = generation;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Child list of a target; `None` when the target is a file or missing.
    pub fn children_of(&self, target: Target) -> Option<&[NodeId]> {
        match target {
            Target::Root => Some(&self.roots),
            Target::Node(id) => match &self.entries.get(&id)?.kind {
                EntryKind::Folder { children, .. } => Some(children),
                EntryKind::File { .. } => None,
            },
        }
    }

    /// Names of a target's children, in order.
    pub fn child_names(&self, target: Target) -> Vec<&str> {
        self.children_of(target)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.entries.get(id))
                    .map(|entry| entry.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Derive the current path of a node from its ancestors' names.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let entry = self.entries.get(&current)?;
            segments.push(entry.name.as_str());
            cursor = entry.parent;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// Append a new child. Returns `None` if the target cannot hold children.
    pub fn insert_child(&mut self, target: Target, name: String, kind: NewNodeKind) -> Option<NodeId> {
        let parent = match target {
            Target::Root => None,
            Target::Node(id) => Some(id),
        };
        let id = NodeId::new();
        match target {
            Target::Root => self.roots.push(id),
            Target::Node(parent_id) => match &mut self.entries.get_mut(&parent_id)?.kind {
                EntryKind::Folder { children, .. } => children.push(id),
                EntryKind::File { .. } => return None,
            },
        }
        let kind = match kind {
            NewNodeKind::File => EntryKind::File { content: None },
            NewNodeKind::Folder => EntryKind::Folder {
                children: Vec::new(),
                collapsed: false,
            },
        };
        self.entries.insert(id, Entry { name, parent, kind });
        self.revision = self.revision.wrapping_add(1);
        Some(id)
    }

    /// Remove a node and its whole subtree, returning a snapshot of it.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let snapshot = self.snapshot(id)?;
        let parent = self.entries.get(&id)?.parent;
        match parent {
            None => self.roots.retain(|child| *child != id),
            Some(parent_id) => {
                if let Some(Entry {
                    kind: EntryKind::Folder { children, .. },
                    ..
                }) = self.entries.get_mut(&parent_id)
                {
                    children.retain(|child| *child != id);
                }
            }
        }
        self.drop_subtree(id);
        self.revision = self.revision.wrapping_add(1);
        Some(snapshot)
    }

    fn drop_subtree(&mut self, id: NodeId) {
        if let Some(entry) = self.entries.remove(&id) {
            if let EntryKind::Folder { children, .. } = entry.kind {
                for child in children {
                    self.drop_subtree(child);
                }
            }
        }
    }

    pub fn rename(&mut self, id: NodeId, name: String) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.name = name;
                self.revision = self.revision.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Set a folder's collapsed flag. Files are left alone.
    pub fn set_collapsed(&mut self, id: NodeId, value: bool) -> bool {
        match self.entries.get_mut(&id).map(|entry| &mut entry.kind) {
            Some(EntryKind::Folder { collapsed, .. }) => {
                *collapsed = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_all_collapsed(&mut self, value: bool) {
        for entry in self.entries.values_mut() {
            if let EntryKind::Folder { collapsed, .. } = &mut entry.kind {
                *collapsed = value;
            }
        }
    }

    pub fn set_content(&mut self, id: NodeId, value: String) -> bool {
        match self.entries.get_mut(&id).map(|entry| &mut entry.kind) {
            Some(EntryKind::File { content }) => {
                *content = Some(value);
                self.revision = self.revision.wrapping_add(1);
                true
            }
            _ => false,
        }
    }

    /// Host-facing copy of a node and its descendants.
    pub fn snapshot(&self, id: NodeId) -> Option<Node> {
        let entry = self.entries.get(&id)?;
        Some(match &entry.kind {
            EntryKind::Folder {
                children,
                collapsed,
            } => Node::Folder {
                name: entry.name.clone(),
                children: children.iter().filter_map(|c| self.snapshot(*c)).collect(),
                collapsed: *collapsed,
            },
            EntryKind::File { content } => Node::File {
                name: entry.name.clone(),
                content: content.clone(),
            },
        })
    }

    pub fn to_forest(&self) -> Forest {
        self.roots.iter().filter_map(|id| self.snapshot(*id)).collect()
    }

    /// Every node path in depth-first order.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.entries.len());
        self.collect_paths(&self.roots, "", &mut out);
        out
    }

    fn collect_paths(&self, ids: &[NodeId], parent: &str, out: &mut Vec<String>) {
        for id in ids {
            if let Some(entry) = self.entries.get(id) {
                let path = TreePath::join(parent, &entry.name);
                if let EntryKind::Folder { children, .. } = &entry.kind {
                    out.push(path.clone());
                    self.collect_paths(children, &path, out);
                } else {
                    out.push(path);
                }
            }
        }
    }
}

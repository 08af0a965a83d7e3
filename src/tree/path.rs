//! Path resolution.
//!
//! Resolution is always recomputed from current names and never memoised.
//! When sibling names collide, the first match in order wins.

use crate::tree::arena::{Target, Tree};
use crate::tree::node::Node;
use crate::types::{NodeId, PATH_SEPARATOR};

/// Resolve a path inside an arena tree.
///
/// The empty path resolves to [`Target::Root`]. Resolution fails as soon as a
/// segment has no match or a segment would descend into a file.
pub fn resolve(tree: &Tree, path: &str) -> Option<Target> {
    if path.is_empty() {
        return Some(Target::Root);
    }
    let mut current = Target::Root;
    for segment in path.split(PATH_SEPARATOR) {
        let children = tree.children_of(current)?;
        let found = children
            .iter()
            .copied()
            .find(|id| tree.get(*id).map(|e| e.name() == segment).unwrap_or(false))?;
        current = Target::Node(found);
    }
    Some(current)
}

/// Resolve a path to a concrete node, excluding the root.
pub fn resolve_node(tree: &Tree, path: &str) -> Option<NodeId> {
    match resolve(tree, path)? {
        Target::Node(id) => Some(id),
        Target::Root => None,
    }
}

/// Resolution result over a plain [`Node`] forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    /// Synthetic wrapper whose children are the forest itself.
    Root(&'a [Node]),
    Node(&'a Node),
}

impl<'a> Resolved<'a> {
    pub fn children(&self) -> Option<&'a [Node]> {
        match self {
            Resolved::Root(children) => Some(children),
            Resolved::Node(node) => node.children(),
        }
    }

    /// The resolved node; `None` for the root.
    pub fn node(&self) -> Option<&'a Node> {
        match self {
            Resolved::Root(_) => None,
            Resolved::Node(node) => Some(node),
        }
    }
}

/// Resolve a path inside a host-facing forest value.
pub fn resolve_in<'a>(forest: &'a [Node], path: &str) -> Option<Resolved<'a>> {
    if path.is_empty() {
        return Some(Resolved::Root(forest));
    }
    let mut current = Resolved::Root(forest);
    for segment in path.split(PATH_SEPARATOR) {
        let found = current.children()?.iter().find(|n| n.name() == segment)?;
        current = Resolved::Node(found);
    }
    Some(current)
}

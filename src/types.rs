//! Core types shared across the tree engine.
//!
//! Paths are root-relative, `/`-joined sibling names. The empty string is the
//! forest root itself, never a node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier assigned to every node held by a [`crate::tree::Tree`].
///
/// Identifiers are internal to one tree instance and never cross the public
/// path-based boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Path string helpers.
pub struct TreePath;

impl TreePath {
    /// Join a parent path and a child name.
    pub fn join(parent: &str, name: &str) -> String {
        if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", parent, PATH_SEPARATOR, name)
        }
    }

    /// Split a path into `(parent_path, last_segment)`.
    ///
    /// A single-segment path has the empty (root) parent.
    pub fn split_parent(path: &str) -> (&str, &str) {
        match path.rfind(PATH_SEPARATOR) {
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => ("", path),
        }
    }

    /// True when `path` equals `prefix` or lies underneath it.
    pub fn is_within(path: &str, prefix: &str) -> bool {
        if prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with(PATH_SEPARATOR),
            None => false,
        }
    }

    /// Replace the `from` prefix of `path` with `to`.
    ///
    /// Returns `None` when `path` is not within `from`, or `from` is the root.
    pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
        if from.is_empty() || !Self::is_within(path, from) {
            return None;
        }
        Some(format!("{}{}", to, &path[from.len()..]))
    }
}

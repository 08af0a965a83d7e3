//! Host-facing node data model.

use serde::{Deserialize, Serialize};

/// A file or folder as exchanged with hosts (`localData`, `onLoad` results).
///
/// Siblings are identified by name; nothing here carries a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<Node>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        collapsed: bool,
    },
    File {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

/// The ordered top-level node sequence. There is no enclosing root node.
pub type Forest = Vec<Node>;

impl Node {
    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Folder {
            name: name.into(),
            children,
            collapsed: false,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Node::File {
            name: name.into(),
            content: None,
        }
    }

    pub fn file_with_content(name: impl Into<String>, content: impl Into<String>) -> Self {
        Node::File {
            name: name.into(),
            content: Some(content.into()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } | Node::File { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Node::File { .. })
    }

    /// Children of a folder; `None` for files.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::File { .. } => None,
        }
    }

    /// Type tag used by hooks, icons and markup.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Node::Folder { .. } => "folder",
            Node::File { .. } => "file",
        }
    }
}

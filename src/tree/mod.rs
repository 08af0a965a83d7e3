//! Tree data model, resolution and naming.

pub mod arena;
pub mod naming;
pub mod node;
pub mod path;

pub use arena::{Entry, NewNodeKind, Target, Tree};
pub use naming::unique_name;
pub use node::{Forest, Node};
pub use path::{resolve, resolve_in, resolve_node, Resolved};

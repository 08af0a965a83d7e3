//! Host hooks
//!
//! Hooks let a host back the tree with its own store. Every hook is awaited,
//! so synchronous hosts simply return a ready value. A hook result of
//! `Ok(None)` means the host does not implement it; `Ok(Some(false))` is an
//! explicit refusal; `Err` is a host failure that propagates to the caller.

use crate::error::HookError;
use crate::tree::{Forest, Node};
use async_trait::async_trait;

/// Result of a hook that may be unimplemented.
pub type HookResult<T> = Result<Option<T>, HookError>;

/// Optional mutation and I/O hooks.
#[async_trait]
pub trait TreeHooks: Send + Sync {
    async fn on_create_file(&self, _parent_path: &str, _name: &str) -> HookResult<bool> {
        Ok(None)
    }

    async fn on_create_folder(&self, _parent_path: &str, _name: &str) -> HookResult<bool> {
        Ok(None)
    }

    async fn on_delete_file(&self, _path: &str, _node: &Node) -> HookResult<bool> {
        Ok(None)
    }

    async fn on_delete_folder(&self, _path: &str, _node: &Node) -> HookResult<bool> {
        Ok(None)
    }

    /// Generic fallback when the type-specific delete hook is unimplemented.
    async fn on_delete_node(&self, _path: &str, _node: &Node) -> HookResult<bool> {
        Ok(None)
    }

    async fn on_rename_node(&self, _path: &str, _new_name: &str) -> HookResult<bool> {
        Ok(None)
    }

    /// File content; `Ok(None)` falls back to the node's stored content.
    async fn on_read_file(&self, _path: &str, _node: &Node) -> HookResult<String> {
        Ok(None)
    }

    /// Persist content; `Ok(None)` writes onto the node instead.
    async fn on_write_file(&self, _path: &str, _content: &str) -> HookResult<bool> {
        Ok(None)
    }
}

/// Source of the forest in hosted mode.
#[async_trait]
pub trait TreeLoader: Send + Sync {
    async fn load(&self) -> Result<Forest, HookError>;
}

/// Hook set with nothing implemented.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

#[async_trait]
impl TreeHooks for NoHooks {}

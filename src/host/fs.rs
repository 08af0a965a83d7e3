//! Directory-backed hooks and loader.
//!
//! Tree paths map onto paths below `root`. Every mutation goes to disk and the
//! engine picks the result up on its next reload.

use crate::error::HookError;
use crate::hooks::{HookResult, TreeHooks, TreeLoader};
use crate::tree::{Forest, Node};
use crate::types::PATH_SEPARATOR;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Host that mirrors a directory.
#[derive(Debug, Clone)]
pub struct FsHost {
    root: PathBuf,
    include_hidden: bool,
}

impl FsHost {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
        }
    }

    /// Also list dot-files and dot-directories.
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a tree path onto disk. The empty path is the root directory.
    pub fn disk_path(&self, path: &str) -> Result<PathBuf, HookError> {
        let mut disk = self.root.clone();
        if path.is_empty() {
            return Ok(disk);
        }
        for segment in path.split(PATH_SEPARATOR) {
            disk.push(checked_segment(segment)?);
        }
        Ok(disk)
    }

    /// Walk the directory into a forest: folders first, then by name.
    pub fn scan(&self) -> Result<Forest, HookError> {
        let include_hidden = self.include_hidden;
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by(|a, b| {
                b.file_type()
                    .is_dir()
                    .cmp(&a.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(move |entry| entry.depth() == 0 || include_hidden || !is_hidden(entry));

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", self.root.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push((entry.depth(), name, entry.file_type().is_dir()));
        }
        let mut index = 0;
        Ok(assemble(&entries, &mut index, 1))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn checked_segment(segment: &str) -> Result<&str, HookError> {
    match segment {
        "" | "." | ".." => Err(anyhow!("Invalid path segment {:?}", segment)),
        s if s.contains('\\') => Err(anyhow!("Invalid path segment {:?}", segment)),
        s => Ok(s),
    }
}

/// Rebuild nesting from pre-order `(depth, name, is_dir)` entries.
fn assemble(entries: &[(usize, String, bool)], index: &mut usize, depth: usize) -> Vec<Node> {
    let mut nodes = Vec::new();
    while let Some((entry_depth, name, is_dir)) = entries.get(*index) {
        if *entry_depth != depth {
            break;
        }
        *index += 1;
        if *is_dir {
            let children = assemble(entries, index, depth + 1);
            nodes.push(Node::folder(name.clone(), children));
        } else {
            nodes.push(Node::file(name.clone()));
        }
    }
    nodes
}

/// Expected refusals become `Some(false)`; anything else is a host failure.
fn refusal(result: std::io::Result<()>, action: &str, path: &Path) -> HookResult<bool> {
    match result {
        Ok(()) => Ok(Some(true)),
        Err(e) if matches!(e.kind(), ErrorKind::AlreadyExists | ErrorKind::NotFound) => {
            debug!(action, path = %path.display(), error = %e, "Filesystem refused");
            Ok(Some(false))
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to {} {}", action, path.display()))),
    }
}

#[async_trait]
impl TreeLoader for FsHost {
    async fn load(&self) -> Result<Forest, HookError> {
        let host = self.clone();
        tokio::task::spawn_blocking(move || host.scan())
            .await
            .context("Directory scan task failed")?
    }
}

#[async_trait]
impl TreeHooks for FsHost {
    async fn on_create_file(&self, parent_path: &str, name: &str) -> HookResult<bool> {
        let target = self.disk_path(parent_path)?.join(checked_segment(name)?);
        let result = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map(|_| ());
        refusal(result, "create file", &target)
    }

    async fn on_create_folder(&self, parent_path: &str, name: &str) -> HookResult<bool> {
        let target = self.disk_path(parent_path)?.join(checked_segment(name)?);
        refusal(tokio::fs::create_dir(&target).await, "create folder", &target)
    }

    async fn on_delete_file(&self, path: &str, _node: &Node) -> HookResult<bool> {
        let target = self.disk_path(path)?;
        refusal(tokio::fs::remove_file(&target).await, "delete file", &target)
    }

    async fn on_delete_folder(&self, path: &str, _node: &Node) -> HookResult<bool> {
        let target = self.disk_path(path)?;
        refusal(tokio::fs::remove_dir_all(&target).await, "delete folder", &target)
    }

    async fn on_rename_node(&self, path: &str, new_name: &str) -> HookResult<bool> {
        let from = self.disk_path(path)?;
        let to = match from.parent() {
            Some(parent) => parent.join(checked_segment(new_name)?),
            None => return Ok(Some(false)),
        };
        if from == to {
            return Ok(Some(true));
        }
        // rename(2) silently replaces files.
        if tokio::fs::try_exists(&to)
            .await
            .with_context(|| format!("Failed to check {}", to.display()))?
        {
            debug!(path, new_name, "Rename target exists");
            return Ok(Some(false));
        }
        refusal(tokio::fs::rename(&from, &to).await, "rename", &from)
    }

    async fn on_read_file(&self, path: &str, _node: &Node) -> HookResult<String> {
        let target = self.disk_path(path)?;
        let content = tokio::fs::read_to_string(&target)
            .await
            .with_context(|| format!("Failed to read {}", target.display()))?;
        Ok(Some(content))
    }

    async fn on_write_file(&self, path: &str, content: &str) -> HookResult<bool> {
        let target = self.disk_path(path)?;
        tokio::fs::write(&target, content)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(Some(true))
    }
}

//! Mutation Engine
//!
//! `TreeForge` owns the canonical tree and its operating mode. Local mode
//! mutates the tree in place; hosted mode delegates every structural edit to a
//! hook and substitutes the whole forest on reload.
//!
//! All state sits behind short-lived locks that are never held across an
//! await. Operations are not serialised against each other: every
//! continuation re-resolves its path, so a node that vanished while a hook or
//! prompt was pending is simply not found.

mod config;
mod editing;
mod mutation;

pub use config::{
    DataSource, DeleteConfirm, FileOpenCallback, MissingParentPolicy, RenamePrompt,
    TreeForgeConfig,
};
pub use editing::{CLOSE_UNSAVED_PROMPT, SWITCH_UNSAVED_PROMPT};

use crate::editor::{BuiltInEditor, EditorPanel, EditorState};
use crate::error::{BuildError, TreeError};
use crate::hooks::{TreeHooks, TreeLoader};
use crate::render::{render_markup, render_text, TextLine, TreeSettings};
use crate::surface::{TreeMount, UiAdapter};
use crate::tree::{resolve, resolve_node, Forest, Node, Target, Tree};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Operating mode, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Hosted,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Local => write!(f, "local"),
            Mode::Hosted => write!(f, "hosted"),
        }
    }
}

/// Tree widget engine instance.
pub struct TreeForge {
    mode: Mode,
    tree: RwLock<Tree>,
    loader: Option<Arc<dyn TreeLoader>>,
    hooks: Arc<dyn TreeHooks>,
    settings: TreeSettings,
    missing_parent: MissingParentPolicy,
    ui: Arc<dyn UiAdapter>,
    mount: Arc<dyn TreeMount>,
    editor: Mutex<EditorState>,
    panel: EditorPanel,
    on_file_open: Option<FileOpenCallback>,
    rename_prompt: Option<RenamePrompt>,
    delete_confirm: Option<DeleteConfirm>,
    render_generation: AtomicU64,
    selected: Mutex<Option<String>>,
}

impl TreeForge {
    /// Validate the configuration and build an instance.
    ///
    /// Local mode is rendered immediately. Hosted mode starts empty until the
    /// first [`TreeForge::refresh`]; use [`TreeForge::mount`] to do both.
    pub fn new(config: TreeForgeConfig) -> Result<Self, BuildError> {
        let mount = config
            .document
            .mount(&config.container_id)
            .ok_or_else(|| BuildError::MissingContainer(config.container_id.clone()))?;

        let (mode, tree, loader) = match config.data {
            Some(DataSource::Local(forest)) => (Mode::Local, Tree::from_forest(&forest), None),
            Some(DataSource::Hosted(loader)) => (Mode::Hosted, Tree::new(), Some(loader)),
            None => return Err(BuildError::MissingLoader),
        };

        let validation = config.settings.validate();
        if !validation.is_valid() {
            return Err(BuildError::InvalidSettings(validation.errors.join("; ")));
        }

        let panel = EditorPanel::from_wiring(&config.editor, config.document.as_ref())?;

        let forge = Self {
            mode,
            tree: RwLock::new(tree),
            loader,
            hooks: config.hooks,
            settings: config.settings,
            missing_parent: config.missing_parent,
            ui: config.ui,
            mount,
            editor: Mutex::new(EditorState::new()),
            panel,
            on_file_open: config.on_file_open,
            rename_prompt: config.rename_prompt,
            delete_confirm: config.delete_confirm,
            render_generation: AtomicU64::new(0),
            selected: Mutex::new(None),
        };
        info!(mode = %forge.mode, container = %config.container_id, "Tree mounted");
        if forge.mode == Mode::Local {
            forge.rerender();
        }
        Ok(forge)
    }

    /// Build and perform the initial refresh.
    pub async fn mount(config: TreeForgeConfig) -> Result<Self, TreeMountError> {
        let forge = Self::new(config)?;
        forge.refresh().await?;
        Ok(forge)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    /// Copy of the current forest.
    pub fn forest(&self) -> Forest {
        self.tree.read().to_forest()
    }

    /// Copy of the node at `path`, if any.
    pub fn node(&self, path: &str) -> Option<Node> {
        let tree = self.tree.read();
        resolve_node(&tree, path).and_then(|id| tree.snapshot(id))
    }

    /// Increments each time the forest is substituted by a reload.
    pub fn tree_generation(&self) -> u64 {
        self.tree.read().generation()
    }

    /// Increments on every in-place structural or content change.
    pub fn tree_revision(&self) -> u64 {
        self.tree.read().revision()
    }

    /// Generation of the last render pass pushed to the mount.
    pub fn render_generation(&self) -> u64 {
        self.render_generation.load(Ordering::SeqCst)
    }

    pub fn text_lines(&self) -> Vec<TextLine> {
        render_text(&self.tree.read(), &self.settings)
    }

    pub fn built_in_editor(&self) -> Option<&BuiltInEditor> {
        self.panel.built_in()
    }

    pub fn current_file(&self) -> Option<String> {
        self.editor.lock().current().map(str::to_string)
    }

    pub fn is_unsaved(&self, path: &str) -> bool {
        self.editor.lock().is_unsaved(path)
    }

    pub fn cached_content(&self, path: &str) -> Option<String> {
        self.editor.lock().cached(path).map(str::to_string)
    }

    pub fn editor_state(&self) -> EditorState {
        self.editor.lock().clone()
    }

    /// Reload (hosted mode) and re-render.
    ///
    /// The loaded forest replaces the tree wholesale; collapsed flags survive
    /// only if the host returns them.
    pub async fn refresh(&self) -> Result<(), TreeError> {
        if let Some(loader) = &self.loader {
            let forest = loader.load().await.map_err(TreeError::Load)?;
            let mut tree = self.tree.write();
            tree.replace(&forest);
            info!(nodes = tree.len(), generation = tree.generation(), "Forest reloaded");
        }
        self.rerender();
        Ok(())
    }

    /// Render the current tree, replace the mounted content, then re-bind.
    pub(crate) fn rerender(&self) {
        let generation = self.render_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let view = {
            let tree = self.tree.read();
            render_markup(&tree, &self.settings, generation)
        };
        self.mount.replace_content(&view.markup);
        self.mount.bind(view.generation, &view.bindings);
        debug!(generation, bindings = view.bindings.len(), "Tree rendered");
    }

    pub fn collapse(&self, path: &str) -> bool {
        self.set_collapsed(path, true)
    }

    pub fn uncollapse(&self, path: &str) -> bool {
        self.set_collapsed(path, false)
    }

    /// Flip a folder's collapsed flag. Returns false for non-folders.
    pub fn toggle(&self, path: &str) -> bool {
        let collapsed = {
            let tree = self.tree.read();
            match resolve_node(&tree, path).and_then(|id| tree.get(id)) {
                Some(entry) if entry.is_folder() => entry.collapsed(),
                _ => return false,
            }
        };
        self.set_collapsed(path, !collapsed)
    }

    fn set_collapsed(&self, path: &str, value: bool) -> bool {
        let changed = {
            let mut tree = self.tree.write();
            match resolve_node(&tree, path) {
                Some(id) => tree.set_collapsed(id, value),
                None => false,
            }
        };
        if changed {
            self.rerender();
        } else {
            debug!(path, "Collapse target is not a folder");
        }
        changed
    }

    /// Collapse or expand every folder.
    pub fn set_all_collapsed(&self, value: bool) {
        self.tree.write().set_all_collapsed(value);
        self.rerender();
    }

    pub(crate) fn ui(&self) -> &dyn UiAdapter {
        self.ui.as_ref()
    }

    pub(crate) fn select(&self, path: &str) {
        *self.selected.lock() = Some(path.to_string());
    }

    /// Path the context menu was last opened on.
    pub fn selected_path(&self) -> Option<String> {
        self.selected.lock().clone()
    }

    pub(crate) fn is_file(&self, path: &str) -> bool {
        let tree = self.tree.read();
        matches!(
            resolve(&tree, path),
            Some(Target::Node(id)) if tree.get(id).map(|e| e.is_file()).unwrap_or(false)
        )
    }

    /// Names of the children of `parent_path`, or of the root if it does
    /// not resolve to a folder.
    pub(crate) fn sibling_names(&self, parent_path: &str) -> Vec<String> {
        let tree = self.tree.read();
        let target = resolve(&tree, parent_path).unwrap_or(Target::Root);
        tree.child_names(target)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// Failure of [`TreeForge::mount`].
#[derive(Debug, thiserror::Error)]
pub enum TreeMountError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

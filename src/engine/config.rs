//! Construction-time configuration for a [`super::TreeForge`] instance.

use crate::config::ForgeConfig;
use crate::editor::EditorWiring;
use crate::hooks::{NoHooks, TreeHooks, TreeLoader};
use crate::render::TreeSettings;
use crate::surface::{Document, HeadlessUi, UiAdapter};
use crate::tree::{Forest, Node};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fired with the opened file before its content is loaded.
pub type FileOpenCallback = Arc<dyn Fn(&Node) + Send + Sync>;

/// Synchronous replacement for the rename prompt. Receives the old name.
pub type RenamePrompt = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Synchronous replacement for the delete confirmation. Receives the node name.
pub type DeleteConfirm = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Where the forest comes from. Fixes the operating mode.
#[derive(Clone)]
pub enum DataSource {
    /// The engine owns and mutates this forest directly.
    Local(Forest),
    /// Every mutation goes through hooks; the forest is replaced by `load`.
    Hosted(Arc<dyn TreeLoader>),
}

/// Target used by local-mode create when the parent path does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingParentPolicy {
    /// Create at the forest root.
    #[default]
    Root,
    /// Report failure.
    Fail,
}

/// Everything a `TreeForge` consumes once at construction.
#[derive(Clone)]
pub struct TreeForgeConfig {
    pub container_id: String,
    /// `None` is only valid for hosts that must then fail construction.
    pub data: Option<DataSource>,
    pub settings: TreeSettings,
    pub hooks: Arc<dyn TreeHooks>,
    pub on_file_open: Option<FileOpenCallback>,
    pub editor: EditorWiring,
    pub rename_prompt: Option<RenamePrompt>,
    pub delete_confirm: Option<DeleteConfirm>,
    pub missing_parent: MissingParentPolicy,
    pub ui: Arc<dyn UiAdapter>,
    pub document: Arc<dyn Document>,
}

impl TreeForgeConfig {
    pub fn new(container_id: impl Into<String>, document: Arc<dyn Document>) -> Self {
        Self {
            container_id: container_id.into(),
            data: None,
            settings: TreeSettings::default(),
            hooks: Arc::new(NoHooks),
            on_file_open: None,
            editor: EditorWiring::BuiltIn,
            rename_prompt: None,
            delete_confirm: None,
            missing_parent: MissingParentPolicy::default(),
            ui: Arc::new(HeadlessUi),
            document,
        }
    }

    pub fn local(container_id: impl Into<String>, document: Arc<dyn Document>, forest: Forest) -> Self {
        Self::new(container_id, document).with_data(DataSource::Local(forest))
    }

    pub fn hosted(
        container_id: impl Into<String>,
        document: Arc<dyn Document>,
        loader: Arc<dyn TreeLoader>,
    ) -> Self {
        Self::new(container_id, document).with_data(DataSource::Hosted(loader))
    }

    pub fn with_data(mut self, data: DataSource) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_settings(mut self, settings: TreeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn TreeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_ui(mut self, ui: Arc<dyn UiAdapter>) -> Self {
        self.ui = ui;
        self
    }

    pub fn with_editor(mut self, editor: EditorWiring) -> Self {
        self.editor = editor;
        self
    }

    pub fn on_file_open(mut self, callback: impl Fn(&Node) + Send + Sync + 'static) -> Self {
        self.on_file_open = Some(Arc::new(callback));
        self
    }

    pub fn rename_prompt(mut self, prompt: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        self.rename_prompt = Some(Arc::new(prompt));
        self
    }

    pub fn delete_confirm(mut self, confirm: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.delete_confirm = Some(Arc::new(confirm));
        self
    }

    pub fn with_missing_parent(mut self, policy: MissingParentPolicy) -> Self {
        self.missing_parent = policy;
        self
    }

    /// Apply file/environment configuration.
    pub fn with_forge_config(mut self, config: &ForgeConfig) -> Self {
        self.settings = config.settings.clone();
        self.missing_parent = config.behavior.missing_parent;
        self
    }
}

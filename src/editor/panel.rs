//! Display elements bound to the editor tracker.

use crate::error::BuildError;
use crate::surface::{Document, EditorElement, MemoryElement};
use std::sync::Arc;

/// Filename label shown with nothing open.
pub const NO_FILE_SELECTED: &str = "No file selected";

/// Ids of host-supplied editor elements. Only `input` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorElementIds {
    pub input: String,
    pub filename: Option<String>,
    pub save_button: Option<String>,
    pub close_button: Option<String>,
    pub unsaved_indicator: Option<String>,
    pub container: Option<String>,
}

impl EditorElementIds {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

/// How the editor display is provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorWiring {
    /// Build an in-memory panel owned by the engine.
    #[default]
    BuiltIn,
    Custom(EditorElementIds),
}

/// The built-in panel's elements, exposed for headless hosts.
#[derive(Debug, Clone)]
pub struct BuiltInEditor {
    pub input: Arc<MemoryElement>,
    pub filename: Arc<MemoryElement>,
    pub unsaved_indicator: Arc<MemoryElement>,
    pub container: Arc<MemoryElement>,
}

impl BuiltInEditor {
    fn new() -> Self {
        Self {
            input: Arc::new(MemoryElement::new("", true)),
            filename: Arc::new(MemoryElement::new(NO_FILE_SELECTED, true)),
            unsaved_indicator: Arc::new(MemoryElement::new("●", false)),
            container: Arc::new(MemoryElement::new("", false)),
        }
    }

    pub fn buffer(&self) -> String {
        self.input.text()
    }

    pub fn filename(&self) -> String {
        self.filename.text()
    }

    pub fn unsaved_shown(&self) -> bool {
        self.unsaved_indicator.is_visible()
    }

    pub fn is_open(&self) -> bool {
        self.container.is_visible()
    }
}

/// Elements the tracker writes its state into.
pub struct EditorPanel {
    input: Arc<dyn EditorElement>,
    filename: Option<Arc<dyn EditorElement>>,
    unsaved_indicator: Option<Arc<dyn EditorElement>>,
    container: Option<Arc<dyn EditorElement>>,
    built_in: Option<BuiltInEditor>,
}

impl EditorPanel {
    /// Resolve the wiring against a document.
    ///
    /// Every id that is configured must resolve.
    pub fn from_wiring(wiring: &EditorWiring, document: &dyn Document) -> Result<Self, BuildError> {
        match wiring {
            EditorWiring::BuiltIn => {
                let built_in = BuiltInEditor::new();
                Ok(Self {
                    input: built_in.input.clone(),
                    filename: Some(built_in.filename.clone()),
                    unsaved_indicator: Some(built_in.unsaved_indicator.clone()),
                    container: Some(built_in.container.clone()),
                    built_in: Some(built_in),
                })
            }
            EditorWiring::Custom(ids) => {
                let lookup = |id: &Option<String>| -> Result<Option<Arc<dyn EditorElement>>, BuildError> {
                    match id {
                        Some(id) => document
                            .element(id)
                            .map(Some)
                            .ok_or_else(|| BuildError::MissingEditorElement(id.clone())),
                        None => Ok(None),
                    }
                };
                let input = document
                    .element(&ids.input)
                    .ok_or_else(|| BuildError::MissingEditorElement(ids.input.clone()))?;
                // Buttons only need to exist; the host routes their clicks as events.
                lookup(&ids.save_button)?;
                lookup(&ids.close_button)?;
                Ok(Self {
                    input,
                    filename: lookup(&ids.filename)?,
                    unsaved_indicator: lookup(&ids.unsaved_indicator)?,
                    container: lookup(&ids.container)?,
                    built_in: None,
                })
            }
        }
    }

    pub fn built_in(&self) -> Option<&BuiltInEditor> {
        self.built_in.as_ref()
    }

    pub fn buffer(&self) -> String {
        self.input.text()
    }

    pub fn set_buffer(&self, text: &str) {
        self.input.set_text(text);
    }

    pub fn show_file(&self, name: &str, content: &str, unsaved: bool) {
        self.input.set_text(content);
        self.set_filename(name);
        self.set_unsaved(unsaved);
        if let Some(container) = &self.container {
            container.set_visible(true);
        }
    }

    pub fn set_filename(&self, name: &str) {
        if let Some(filename) = &self.filename {
            filename.set_text(name);
        }
    }

    pub fn set_unsaved(&self, shown: bool) {
        if let Some(indicator) = &self.unsaved_indicator {
            indicator.set_visible(shown);
        }
    }

    /// Back to placeholders with the panel hidden.
    pub fn reset(&self) {
        if let Some(container) = &self.container {
            container.set_visible(false);
        }
        self.input.set_text("");
        self.set_filename(NO_FILE_SELECTED);
        self.set_unsaved(false);
    }
}

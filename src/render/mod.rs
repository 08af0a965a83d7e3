//! Tree Renderer
//!
//! Pure functions from a tree plus display settings to a derived view. The
//! engine re-runs them after every committed change and replaces the mounted
//! content wholesale.

pub mod markup;
pub mod settings;
pub mod text;

pub use markup::render_markup;
pub use settings::{AsciiStyle, Connectors, TreeSettings, ValidationResult};
pub use text::{render_text, TextLine};

/// Interaction handlers a rendered node element accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Click toggles collapse; inline rename; context menu.
    Folder,
    /// Click opens in the editor; inline rename; context menu.
    File,
}

/// One rendered node element and the handlers bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    pub path: String,
    pub kind: BindingKind,
}

/// A complete render pass.
///
/// `generation` increases with every render so a mount can discard handler
/// bindings from an older pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub generation: u64,
    pub markup: String,
    pub bindings: Vec<NodeBinding>,
}

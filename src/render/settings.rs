//! Display settings consumed by the renderers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connector glyph family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsciiStyle {
    #[default]
    Unicode,
    Ascii,
}

/// Glyphs drawn in front of each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectors {
    pub branch: &'static str,
    pub last: &'static str,
    pub pipe: &'static str,
    pub blank: &'static str,
}

impl AsciiStyle {
    pub fn connectors(&self) -> Connectors {
        match self {
            AsciiStyle::Unicode => Connectors {
                branch: "├── ",
                last: "└── ",
                pipe: "│   ",
                blank: "    ",
            },
            AsciiStyle::Ascii => Connectors {
                branch: "|-- ",
                last: "`-- ",
                pipe: "|   ",
                blank: "    ",
            },
        }
    }
}

/// Largest accepted `indent`.
pub const MAX_INDENT: usize = 16;

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSettings {
    #[serde(default, alias = "asciiStyle")]
    pub ascii_style: AsciiStyle,

    /// Spaces per nesting level. Informational; connectors define the layout.
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Semantic slot (`folder`, `file`, `open`, `background`, ...) to color token.
    #[serde(default = "default_colors")]
    pub colors: BTreeMap<String, String>,

    /// Node type (`folder`, `file`, `open`) or file extension tag to glyph.
    #[serde(default = "default_icons")]
    pub icons: BTreeMap<String, String>,
}

fn default_indent() -> usize {
    2
}

fn default_colors() -> BTreeMap<String, String> {
    [
        ("folder", "#0366d6"),
        ("file", "#586069"),
        ("open", "#0366d6"),
        ("background", "#ffffff"),
        ("hover", "#f6f8fa"),
        ("selected", "#e1e4e8"),
        ("border", "#e1e4e8"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_icons() -> BTreeMap<String, String> {
    [("folder", "📁"), ("file", "📄"), ("open", "📂")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            ascii_style: AsciiStyle::default(),
            indent: default_indent(),
            colors: default_colors(),
            icons: default_icons(),
        }
    }
}

impl TreeSettings {
    /// Glyph for a file, preferring its extension tag over the generic `file` icon.
    pub fn file_icon(&self, name: &str) -> &str {
        extension_tag(name)
            .and_then(|ext| self.icons.get(&ext))
            .or_else(|| self.icons.get("file"))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Glyph for a folder; expanded folders use `open` when configured.
    pub fn folder_icon(&self, collapsed: bool) -> &str {
        let open = if collapsed { None } else { self.icons.get("open") };
        open.or_else(|| self.icons.get("folder"))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn color(&self, slot: &str) -> Option<&str> {
        self.colors.get(slot).map(String::as_str)
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        if self.indent > MAX_INDENT {
            result.add_error(format!(
                "indent must be at most {}, got {}",
                MAX_INDENT, self.indent
            ));
        }
        for (slot, value) in &self.colors {
            if value.trim().is_empty() {
                result.add_warning(format!("color for {:?} is empty", slot));
            }
        }
        for (tag, glyph) in &self.icons {
            if glyph.is_empty() {
                result.add_warning(format!("icon for {:?} is empty", tag));
            }
        }
        result
    }
}

/// Lowercased extension without the dot, using the same split rule as naming.
fn extension_tag(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => Some(name[idx + 1..].to_lowercase()),
        _ => None,
    }
}

/// Outcome of a settings check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Warnings do not invalidate.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

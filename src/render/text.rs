use super::TreeSettings;
use crate::tree::{Target, Tree};
use crate::types::{NodeId, TreePath};

/// One row of a plain-text tree listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub path: String,
    pub depth: usize,
    /// Connector glyphs, including the ancestors' pipes.
    pub prefix: String,
    pub icon: String,
    pub name: String,
    pub is_folder: bool,
    pub collapsed: bool,
}

impl TextLine {
    pub fn plain(&self) -> String {
        format!("{}{} {}", self.prefix, self.icon, self.name)
    }
}

/// Render the visible rows of a tree for terminal output.
pub fn render_text(tree: &Tree, settings: &TreeSettings) -> Vec<TextLine> {
    let mut lines = Vec::new();
    walk(tree, settings, tree.roots(), "", "", 0, &mut lines);
    lines
}

fn walk(
    tree: &Tree,
    settings: &TreeSettings,
    ids: &[NodeId],
    prefix: &str,
    parent_path: &str,
    depth: usize,
    lines: &mut Vec<TextLine>,
) {
    let connectors = settings.ascii_style.connectors();
    for (idx, id) in ids.iter().enumerate() {
        let Some(entry) = tree.get(*id) else {
            continue;
        };
        let last = idx == ids.len() - 1;
        let path = TreePath::join(parent_path, entry.name());
        let icon = if entry.is_folder() {
            settings.folder_icon(entry.collapsed())
        } else {
            settings.file_icon(entry.name())
        };
        lines.push(TextLine {
            path: path.clone(),
            depth,
            prefix: format!("{}{}", prefix, if last { connectors.last } else { connectors.branch }),
            icon: icon.to_string(),
            name: entry.name().to_string(),
            is_folder: entry.is_folder(),
            collapsed: entry.collapsed(),
        });
        if entry.is_folder() && !entry.collapsed() {
            if let Some(children) = tree.children_of(Target::Node(*id)) {
                let next = format!("{}{}", prefix, if last { connectors.blank } else { connectors.pipe });
                walk(tree, settings, children, &next, &path, depth + 1, lines);
            }
        }
    }
}

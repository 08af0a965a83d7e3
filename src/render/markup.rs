use super::{BindingKind, NodeBinding, RenderedView, TreeSettings};
use crate::tree::{Target, Tree};
use crate::types::{NodeId, TreePath};
use std::fmt::Write;

/// Render the tree as nested node markup.
///
/// Children of collapsed folders are skipped, and so are their bindings.
pub fn render_markup(tree: &Tree, settings: &TreeSettings, generation: u64) -> RenderedView {
    let mut markup = String::new();
    let mut bindings = Vec::new();
    render_level(
        tree,
        settings,
        tree.roots(),
        "",
        "",
        &mut markup,
        &mut bindings,
    );
    RenderedView {
        generation,
        markup,
        bindings,
    }
}

fn render_level(
    tree: &Tree,
    settings: &TreeSettings,
    ids: &[NodeId],
    prefix: &str,
    parent_path: &str,
    out: &mut String,
    bindings: &mut Vec<NodeBinding>,
) {
    let connectors = settings.ascii_style.connectors();
    for (idx, id) in ids.iter().enumerate() {
        let Some(entry) = tree.get(*id) else {
            continue;
        };
        let last = idx == ids.len() - 1;
        let connector = if last { connectors.last } else { connectors.branch };
        let path = TreePath::join(parent_path, entry.name());
        let (icon, color, kind) = if entry.is_folder() {
            let slot = if entry.collapsed() { "folder" } else { "open" };
            (
                settings.folder_icon(entry.collapsed()),
                settings.color(slot).or_else(|| settings.color("folder")),
                BindingKind::Folder,
            )
        } else {
            (
                settings.file_icon(entry.name()),
                settings.color("file"),
                BindingKind::File,
            )
        };

        let style = color
            .map(|c| format!(" style=\"color: {}\"", escape_html(c)))
            .unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "<div class=\"tf-node\" data-path=\"{path}\" data-type=\"{kind}\">\
             <div class=\"tf-node-name\">{prefix}{connector}{icon} \
             <span class=\"tf-name-text\"{style}>{name}</span></div>\
             <span class=\"tf-action\"> ⋮ </span></div>",
            path = escape_html(&path),
            kind = entry.kind_str(),
            prefix = prefix,
            connector = connector,
            icon = icon,
            style = style,
            name = escape_html(entry.name()),
        );
        bindings.push(NodeBinding {
            path: path.clone(),
            kind,
        });

        if entry.is_folder() && !entry.collapsed() {
            if let Some(children) = tree.children_of(Target::Node(*id)) {
                let next_prefix = format!(
                    "{}{}",
                    prefix,
                    if last { connectors.blank } else { connectors.pipe }
                );
                render_level(tree, settings, children, &next_prefix, &path, out, bindings);
            }
        }
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

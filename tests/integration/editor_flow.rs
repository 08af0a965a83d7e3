use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use treeforge::editor::{EditorElementIds, EditorWiring, NO_FILE_SELECTED};
use treeforge::hooks::HookResult;
use treeforge::surface::{EditorElement, MemoryDocument, ScriptedUi};
use treeforge::tree::resolve_in;
use treeforge::{BuildError, Forest, Node, TreeForge, TreeForgeConfig, TreeHooks};

use crate::integration::support::{local_forge, MOUNT};

fn project() -> Forest {
    vec![
        Node::folder(
            "src",
            vec![
                Node::file_with_content("main.rs", "fn main() {}"),
                Node::file_with_content("lib.rs", "pub mod tree;"),
            ],
        ),
        Node::file_with_content("README.md", "# demo"),
    ]
}

fn content_of(forest: &Forest, path: &str) -> Option<String> {
    match resolve_in(forest, path)?.node()? {
        Node::File { content, .. } => content.clone(),
        Node::Folder { .. } => None,
    }
}

#[tokio::test]
async fn unsaved_round_trip_writes_node_content() {
    let (forge, _doc) = local_forge(project(), Arc::new(ScriptedUi::new()));

    assert!(forge.open("src/main.rs").await.unwrap());
    assert!(forge.edit_buffer("fn main() { run(); }"));
    assert!(forge.is_unsaved("src/main.rs"));

    assert!(forge.save_current().await.unwrap());
    assert!(!forge.is_unsaved("src/main.rs"));
    assert_eq!(
        forge.cached_content("src/main.rs").as_deref(),
        Some("fn main() { run(); }")
    );
    assert_eq!(
        content_of(&forge.forest(), "src/main.rs").as_deref(),
        Some("fn main() { run(); }")
    );
    let panel = forge.built_in_editor().unwrap();
    assert!(!panel.unsaved_shown());
}

#[tokio::test]
async fn touching_the_buffer_marks_unsaved_even_without_change() {
    let (forge, _doc) = local_forge(project(), Arc::new(ScriptedUi::new()));
    assert!(!forge.buffer_changed());

    forge.open("README.md").await.unwrap();
    assert!(forge.edit_buffer("# demo"));
    assert!(forge.is_unsaved("README.md"));
    assert!(forge.built_in_editor().unwrap().unsaved_shown());
}

#[tokio::test]
async fn switching_with_unsaved_edits_needs_confirmation() {
    let ui = Arc::new(ScriptedUi::new().confirming([false, true]));
    let (forge, _doc) = local_forge(project(), ui.clone());

    forge.open("src/main.rs").await.unwrap();
    forge.edit_buffer("changed");

    assert!(!forge.open("src/lib.rs").await.unwrap());
    assert_eq!(forge.current_file().as_deref(), Some("src/main.rs"));

    assert!(forge.open("src/lib.rs").await.unwrap());
    assert_eq!(forge.current_file().as_deref(), Some("src/lib.rs"));
    assert_eq!(forge.built_in_editor().unwrap().buffer(), "pub mod tree;");
    assert_eq!(ui.asked().len(), 2);
    // The abandoned edit stays marked under its own path.
    assert!(forge.is_unsaved("src/main.rs"));
}

#[tokio::test]
async fn reopening_the_dirty_file_keeps_the_buffer() {
    let ui = Arc::new(ScriptedUi::new());
    let (forge, _doc) = local_forge(project(), ui.clone());
    forge.open("src/main.rs").await.unwrap();
    forge.edit_buffer("changed");
    assert!(forge.open("src/main.rs").await.unwrap());
    assert!(ui.asked().is_empty());
    let panel = forge.built_in_editor().unwrap();
    assert_eq!(panel.buffer(), "changed");
    assert!(panel.unsaved_shown());
    assert_eq!(forge.cached_content("src/main.rs").as_deref(), Some("fn main() {}"));
}

#[tokio::test]
async fn close_resets_panel_but_keeps_marks() {
    let (forge, _doc) = local_forge(project(), Arc::new(ScriptedUi::new()));
    forge.open("src/main.rs").await.unwrap();
    forge.edit_buffer("draft");
    forge.close();

    let panel = forge.built_in_editor().unwrap();
    assert_eq!(panel.filename(), NO_FILE_SELECTED);
    assert_eq!(panel.buffer(), "");
    assert!(!panel.is_open());
    assert!(!panel.unsaved_shown());
    assert!(forge.current_file().is_none());
    assert!(forge.is_unsaved("src/main.rs"));
    assert!(!forge.save_current().await.unwrap());
}

#[tokio::test]
async fn deleting_a_folder_purges_open_document() {
    let (forge, _doc) = local_forge(project(), Arc::new(ScriptedUi::new().confirming([true])));
    forge.open("src/main.rs").await.unwrap();
    forge.edit_buffer("draft");

    assert!(forge.delete_node("src").await.unwrap());
    assert!(forge.current_file().is_none());
    assert!(!forge.is_unsaved("src/main.rs"));
    assert!(forge.cached_content("src/main.rs").is_none());
    assert_eq!(forge.built_in_editor().unwrap().filename(), NO_FILE_SELECTED);
}

#[tokio::test]
async fn renaming_a_folder_rekeys_open_document() {
    let (forge, _doc) = local_forge(project(), Arc::new(ScriptedUi::new()));
    forge.open("src/main.rs").await.unwrap();
    forge.edit_buffer("draft");

    assert!(forge.rename_node("src", "app").await.unwrap());
    assert_eq!(forge.current_file().as_deref(), Some("app/main.rs"));
    assert!(forge.is_unsaved("app/main.rs"));
    assert!(!forge.is_unsaved("src/main.rs"));
}

/// Serves generated content and refuses every write.
#[derive(Default)]
struct ReadOnlyHost {
    writes: Mutex<Vec<String>>,
}

#[async_trait]
impl TreeHooks for ReadOnlyHost {
    async fn on_read_file(&self, path: &str, _node: &Node) -> HookResult<String> {
        Ok(Some(format!("served:{}", path)))
    }

    async fn on_write_file(&self, path: &str, _content: &str) -> HookResult<bool> {
        self.writes.lock().push(path.to_string());
        Ok(Some(false))
    }
}

#[tokio::test]
async fn refused_write_leaves_editor_state() {
    let host = Arc::new(ReadOnlyHost::default());
    let doc = Arc::new(MemoryDocument::new().with_mount(MOUNT));
    let forge = TreeForge::new(TreeForgeConfig::local(MOUNT, doc, project()).with_hooks(host.clone())).unwrap();

    forge.open("README.md").await.unwrap();
    assert_eq!(forge.built_in_editor().unwrap().buffer(), "served:README.md");
    forge.edit_buffer("# rewritten");

    assert!(!forge.save_current().await.unwrap());
    assert_eq!(host.writes.lock().clone(), vec!["README.md".to_string()]);
    assert!(forge.is_unsaved("README.md"));
    assert_eq!(forge.cached_content("README.md").as_deref(), Some("served:README.md"));
    assert_eq!(content_of(&forge.forest(), "README.md").as_deref(), Some("# demo"));
}

#[tokio::test]
async fn custom_wiring_drives_host_elements() {
    let doc = Arc::new(
        MemoryDocument::new()
            .with_mount(MOUNT)
            .with_element("code")
            .with_element("title")
            .with_element("dot"),
    );
    let mut ids = EditorElementIds::new("code");
    ids.filename = Some("title".to_string());
    ids.unsaved_indicator = Some("dot".to_string());
    let forge = TreeForge::new(
        TreeForgeConfig::local(MOUNT, doc.clone(), project()).with_editor(EditorWiring::Custom(ids)),
    )
    .unwrap();
    assert!(forge.built_in_editor().is_none());

    forge.open("src/lib.rs").await.unwrap();
    assert_eq!(doc.element_handle("code").unwrap().text(), "pub mod tree;");
    assert_eq!(doc.element_handle("title").unwrap().text(), "lib.rs");

    forge.edit_buffer("pub mod render;");
    assert!(doc.element_handle("dot").unwrap().is_visible());
    forge.save_current().await.unwrap();
    assert!(!doc.element_handle("dot").unwrap().is_visible());
    assert_eq!(content_of(&forge.forest(), "src/lib.rs").as_deref(), Some("pub mod render;"));
}

#[test]
fn custom_wiring_with_unknown_element_fails() {
    let doc = Arc::new(MemoryDocument::new().with_mount(MOUNT).with_element("code"));
    let mut ids = EditorElementIds::new("code");
    ids.save_button = Some("save".to_string());
    let result = TreeForge::new(TreeForgeConfig::local(MOUNT, doc, project()).with_editor(EditorWiring::Custom(ids)));
    assert!(matches!(result, Err(BuildError::MissingEditorElement(id)) if id == "save"));
}

use std::sync::Arc;

use treeforge::surface::{ContextAction, EditorElement, MenuPosition, ScriptedUi};
use treeforge::{Node, RenameOutcome, ToolbarAction, UiEvent};

use crate::integration::support::{child_names, local_forge, mount_of, src_forest};

#[tokio::test]
async fn session_driven_by_events() {
    let ui = Arc::new(
        ScriptedUi::new()
            .answering([Some("  util.js ".to_string()), Some("lib".to_string())])
            .confirming([true]),
    );
    let (forge, doc) = local_forge(src_forest(), ui.clone());

    assert!(forge.dispatch(UiEvent::Toolbar(ToolbarAction::NewFile)).await.unwrap());
    assert!(forge.node("util.js").is_some());

    forge
        .dispatch(UiEvent::ContextMenu {
            path: "src".into(),
            position: MenuPosition { x: 10, y: 20 },
        })
        .await
        .unwrap();
    assert!(forge.dispatch(UiEvent::ContextAction(ContextAction::NewFolder)).await.unwrap());
    assert_eq!(child_names(&forge.forest(), "src"), vec!["a.js", "lib"]);

    assert!(forge
        .dispatch(UiEvent::InlineRename {
            path: "util.js".into(),
            text: "helpers.js".to_string(),
        })
        .await
        .unwrap());
    assert!(forge.node("helpers.js").is_some());

    forge
        .dispatch(UiEvent::ContextMenu {
            path: "helpers.js".into(),
            position: MenuPosition::default(),
        })
        .await
        .unwrap();
    assert!(forge.dispatch(UiEvent::ContextAction(ContextAction::Delete)).await.unwrap());
    assert!(forge.node("helpers.js").is_none());

    assert_eq!(
        ui.asked(),
        vec!["Create New File", "Create New Folder", "Delete \"helpers.js\"?"]
    );
    assert_eq!(mount_of(&doc).bound_paths(), vec!["src", "src/a.js", "src/lib"]);
}

#[tokio::test]
async fn collapse_all_then_expand_all() {
    let forest = vec![
        Node::folder("a", vec![Node::folder("b", vec![Node::file("c.txt")])]),
        Node::file("d.txt"),
    ];
    let (forge, doc) = local_forge(forest, Arc::new(ScriptedUi::new()));

    forge.dispatch(UiEvent::Toolbar(ToolbarAction::CollapseAll)).await.unwrap();
    assert_eq!(mount_of(&doc).bound_paths(), vec!["a", "d.txt"]);

    forge.dispatch(UiEvent::Toolbar(ToolbarAction::ExpandAll)).await.unwrap();
    assert_eq!(mount_of(&doc).bound_paths(), vec!["a", "a/b", "a/b/c.txt", "d.txt"]);
}

#[tokio::test]
async fn cancelled_inline_rename_rerenders_only() {
    let (forge, _doc) = local_forge(src_forest(), Arc::new(ScriptedUi::new()));
    let revision = forge.tree_revision();
    let rendered = forge.render_generation();

    let changed = forge
        .dispatch(UiEvent::InlineRenameCancel { path: "src/a.js".into() })
        .await
        .unwrap();
    assert!(!changed);
    assert_eq!(forge.tree_revision(), revision);
    assert_eq!(forge.render_generation(), rendered + 1);
}

#[tokio::test]
async fn inline_rename_onto_missing_node_fails() {
    let (forge, _doc) = local_forge(src_forest(), Arc::new(ScriptedUi::new()));
    let outcome = forge.inline_rename("src/gone.js", "x.js").await.unwrap();
    assert_eq!(outcome, RenameOutcome::Failed);
}

#[tokio::test]
async fn editor_events_track_and_save() {
    let (forge, _doc) = local_forge(
        vec![Node::file_with_content("notes.md", "todo")],
        Arc::new(ScriptedUi::new()),
    );
    assert!(forge.dispatch(UiEvent::NodeClick { path: "notes.md".into() }).await.unwrap());

    let panel = forge.built_in_editor().unwrap();
    panel.input.set_text("done");
    assert!(forge.dispatch(UiEvent::EditorInput).await.unwrap());
    assert!(forge.is_unsaved("notes.md"));

    assert!(forge.dispatch(UiEvent::EditorSave).await.unwrap());
    assert!(!forge.is_unsaved("notes.md"));
    assert_eq!(forge.cached_content("notes.md").as_deref(), Some("done"));

    // Nothing dirty, so closing does not ask.
    assert!(forge.dispatch(UiEvent::EditorClose).await.unwrap());
    assert!(forge.current_file().is_none());
}

#[tokio::test]
async fn context_action_without_selection_is_ignored() {
    let (forge, _doc) = local_forge(src_forest(), Arc::new(ScriptedUi::new()));
    assert!(!forge.context_action(ContextAction::Delete).await.unwrap());
    assert_eq!(forge.forest(), src_forest());
}

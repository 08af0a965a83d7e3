use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use treeforge::hooks::HookResult;
use treeforge::surface::{ScriptedUi, UiAdapter};
use treeforge::tree::resolve_in;
use treeforge::{
    Forest, HookError, Mode, Node, TreeError, TreeForge, TreeForgeConfig, TreeHooks, TreeLoader,
};

use crate::integration::support::{document, src_forest, MOUNT};

/// In-memory host that records hook calls.
#[derive(Default)]
struct RecordingHost {
    forest: Mutex<Forest>,
    loads: AtomicUsize,
    accept: bool,
    fail_creates: bool,
    type_specific_delete: bool,
    calls: Mutex<Vec<String>>,
    rename_gate: Option<Arc<Notify>>,
}

impl RecordingHost {
    fn accepting(forest: Forest) -> Self {
        Self {
            forest: Mutex::new(forest),
            accept: true,
            type_specific_delete: true,
            ..Self::default()
        }
    }

    fn refusing(forest: Forest) -> Self {
        Self {
            forest: Mutex::new(forest),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

fn children_mut<'a>(forest: &'a mut Forest, path: &str) -> Option<&'a mut Vec<Node>> {
    if path.is_empty() {
        return Some(forest);
    }
    let mut current = forest;
    for segment in path.split('/') {
        let node = current.iter_mut().find(|n| n.name() == segment)?;
        match node {
            Node::Folder { children, .. } => current = children,
            Node::File { .. } => return None,
        }
    }
    Some(current)
}

fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}

#[async_trait]
impl TreeLoader for RecordingHost {
    async fn load(&self) -> Result<Forest, HookError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.forest.lock().clone())
    }
}

#[async_trait]
impl TreeHooks for RecordingHost {
    async fn on_create_file(&self, parent_path: &str, name: &str) -> HookResult<bool> {
        self.record(format!("create_file {} {}", parent_path, name));
        if self.fail_creates {
            return Err(anyhow::anyhow!("name {} rejected by host", name));
        }
        if !self.accept {
            return Ok(Some(false));
        }
        let mut forest = self.forest.lock();
        match children_mut(&mut forest, parent_path) {
            Some(children) => {
                children.push(Node::file(name));
                Ok(Some(true))
            }
            None => Ok(Some(false)),
        }
    }

    async fn on_delete_folder(&self, path: &str, _node: &Node) -> HookResult<bool> {
        if !self.type_specific_delete {
            return Ok(None);
        }
        self.record(format!("delete_folder {}", path));
        Ok(Some(self.remove(path)))
    }

    async fn on_delete_file(&self, path: &str, _node: &Node) -> HookResult<bool> {
        if !self.type_specific_delete {
            return Ok(None);
        }
        self.record(format!("delete_file {}", path));
        Ok(Some(self.remove(path)))
    }

    async fn on_delete_node(&self, path: &str, _node: &Node) -> HookResult<bool> {
        self.record(format!("delete_node {}", path));
        Ok(Some(self.remove(path)))
    }

    async fn on_rename_node(&self, path: &str, new_name: &str) -> HookResult<bool> {
        self.record(format!("rename {} {}", path, new_name));
        if let Some(gate) = &self.rename_gate {
            gate.notified().await;
        }
        let (parent, name) = split(path);
        let mut forest = self.forest.lock();
        let node = children_mut(&mut forest, parent)
            .and_then(|children| children.iter_mut().find(|n| n.name() == name));
        match node {
            Some(Node::Folder { name, .. }) | Some(Node::File { name, .. }) => {
                *name = new_name.to_string();
                Ok(Some(true))
            }
            None => Ok(Some(false)),
        }
    }
}

impl RecordingHost {
    fn remove(&self, path: &str) -> bool {
        let (parent, name) = split(path);
        let mut forest = self.forest.lock();
        match children_mut(&mut forest, parent) {
            Some(children) => {
                let before = children.len();
                children.retain(|n| n.name() != name);
                children.len() != before
            }
            None => false,
        }
    }
}

async fn hosted(host: Arc<RecordingHost>, ui: Arc<dyn UiAdapter>) -> TreeForge {
    TreeForge::mount(
        TreeForgeConfig::hosted(MOUNT, document(), host.clone())
            .with_hooks(host)
            .with_ui(ui),
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn hosted_starts_from_loader() {
    let host = Arc::new(RecordingHost::accepting(src_forest()));
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new())).await;
    assert_eq!(forge.mode(), Mode::Hosted);
    assert_eq!(forge.forest(), src_forest());
    assert_eq!(host.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn refused_create_does_not_reload() {
    let host = Arc::new(RecordingHost::refusing(src_forest()));
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new())).await;
    let generation = forge.tree_generation();

    assert!(!forge.create_file("src", "b.js").await.unwrap());
    assert_eq!(forge.tree_generation(), generation);
    assert_eq!(host.loads.load(Ordering::SeqCst), 1);
    assert_eq!(host.calls(), vec!["create_file src b.js"]);
}

#[tokio::test]
async fn accepted_create_reloads_without_allocating_names() {
    let host = Arc::new(RecordingHost::accepting(src_forest()));
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new())).await;

    // Collisions are the host's business in hosted mode.
    assert!(forge.create_file("src", "a.js").await.unwrap());
    assert_eq!(host.calls(), vec!["create_file src a.js"]);
    assert_eq!(host.loads.load(Ordering::SeqCst), 2);
    let names: Vec<String> = forge
        .node("src")
        .unwrap()
        .children()
        .unwrap()
        .iter()
        .map(|n| n.name().to_string())
        .collect();
    assert_eq!(names, vec!["a.js", "a.js"]);
}

#[tokio::test]
async fn host_errors_propagate_without_mutation() {
    let host = Arc::new(RecordingHost {
        fail_creates: true,
        ..RecordingHost::accepting(src_forest())
    });
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new())).await;
    let generation = forge.tree_generation();

    let err = forge.create_file("src", "bad name").await.unwrap_err();
    assert!(matches!(err, TreeError::Hook { hook: "on_create_file", .. }));
    assert_eq!(forge.tree_generation(), generation);
    assert_eq!(forge.forest(), src_forest());
}

#[tokio::test]
async fn delete_uses_type_specific_hook() {
    let host = Arc::new(RecordingHost::accepting(src_forest()));
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new().confirming([true]))).await;
    assert!(forge.delete_node("src").await.unwrap());
    assert_eq!(host.calls(), vec!["delete_folder src"]);
    assert!(forge.forest().is_empty());
}

#[tokio::test]
async fn delete_falls_back_to_generic_hook() {
    let host = Arc::new(RecordingHost {
        type_specific_delete: false,
        ..RecordingHost::accepting(src_forest())
    });
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new().confirming([true]))).await;
    assert!(forge.delete_node("src/a.js").await.unwrap());
    assert_eq!(host.calls(), vec!["delete_node src/a.js"]);
    assert_eq!(forge.node("src"), Some(Node::folder("src", vec![])));
}

#[tokio::test]
async fn declined_delete_never_reaches_host() {
    let host = Arc::new(RecordingHost::accepting(src_forest()));
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new().confirming([false]))).await;
    assert!(!forge.delete_node("src").await.unwrap());
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn collapsed_flags_are_lost_on_reload() {
    let host = Arc::new(RecordingHost::accepting(src_forest()));
    let forge = hosted(host, Arc::new(ScriptedUi::new())).await;
    assert!(forge.collapse("src"));
    assert_eq!(forge.node("src").map(|n| matches!(n, Node::Folder { collapsed: true, .. })), Some(true));
    forge.refresh().await.unwrap();
    assert_eq!(forge.node("src").map(|n| matches!(n, Node::Folder { collapsed: true, .. })), Some(false));
}

#[tokio::test]
async fn delete_while_rename_hook_pending_does_not_crash() {
    let gate = Arc::new(Notify::new());
    let host = Arc::new(RecordingHost {
        rename_gate: Some(gate.clone()),
        ..RecordingHost::accepting(src_forest())
    });
    let forge = hosted(host.clone(), Arc::new(ScriptedUi::new().confirming([true]))).await;

    let (renamed, deleted) = futures::join!(forge.rename_node("src/a.js", "b.js"), async {
        let deleted = forge.delete_node("src/a.js").await;
        gate.notify_one();
        deleted
    });

    assert!(deleted.unwrap());
    // The host found nothing left to rename.
    assert!(!renamed.unwrap());
    assert_eq!(forge.node("src"), Some(Node::folder("src", vec![])));
    assert!(resolve_in(&forge.forest(), "src/b.js").is_none());
}

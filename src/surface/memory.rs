//! In-memory surfaces for headless hosts and tests.

use super::{Document, EditorElement, MenuItem, MenuPosition, TreeMount, UiAdapter};
use crate::render::NodeBinding;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Element holding text and a visibility flag.
#[derive(Debug)]
pub struct MemoryElement {
    state: Mutex<(String, bool)>,
}

impl MemoryElement {
    pub fn new(text: impl Into<String>, visible: bool) -> Self {
        Self {
            state: Mutex::new((text.into(), visible)),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().1
    }
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self::new("", true)
    }
}

impl EditorElement for MemoryElement {
    fn set_text(&self, text: &str) {
        self.state.lock().0 = text.to_string();
    }

    fn text(&self) -> String {
        self.state.lock().0.clone()
    }

    fn set_visible(&self, visible: bool) {
        self.state.lock().1 = visible;
    }
}

/// What happened to a mount, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountEvent {
    Replaced,
    Bound(u64),
}

/// Mount that keeps the latest markup and bindings.
#[derive(Debug, Default)]
pub struct MemoryMount {
    markup: Mutex<String>,
    bindings: Mutex<(u64, Vec<NodeBinding>)>,
    events: Mutex<Vec<MountEvent>>,
}

impl MemoryMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> String {
        self.markup.lock().clone()
    }

    pub fn generation(&self) -> u64 {
        self.bindings.lock().0
    }

    pub fn bound_paths(&self) -> Vec<String> {
        self.bindings.lock().1.iter().map(|b| b.path.clone()).collect()
    }

    pub fn events(&self) -> Vec<MountEvent> {
        self.events.lock().clone()
    }
}

impl TreeMount for MemoryMount {
    fn replace_content(&self, markup: &str) {
        *self.markup.lock() = markup.to_string();
        self.events.lock().push(MountEvent::Replaced);
    }

    fn bind(&self, generation: u64, bindings: &[NodeBinding]) {
        *self.bindings.lock() = (generation, bindings.to_vec());
        self.events.lock().push(MountEvent::Bound(generation));
    }
}

/// Document built from named in-memory mounts and elements.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    mounts: HashMap<String, Arc<MemoryMount>>,
    elements: HashMap<String, Arc<MemoryElement>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount(mut self, id: &str) -> Self {
        self.mounts.insert(id.to_string(), Arc::new(MemoryMount::new()));
        self
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements
            .insert(id.to_string(), Arc::new(MemoryElement::default()));
        self
    }

    pub fn mount_handle(&self, id: &str) -> Option<Arc<MemoryMount>> {
        self.mounts.get(id).cloned()
    }

    pub fn element_handle(&self, id: &str) -> Option<Arc<MemoryElement>> {
        self.elements.get(id).cloned()
    }
}

impl Document for MemoryDocument {
    fn mount(&self, container_id: &str) -> Option<Arc<dyn TreeMount>> {
        self.mounts
            .get(container_id)
            .map(|m| m.clone() as Arc<dyn TreeMount>)
    }

    fn element(&self, id: &str) -> Option<Arc<dyn EditorElement>> {
        self.elements
            .get(id)
            .map(|e| e.clone() as Arc<dyn EditorElement>)
    }
}

/// UI with no user: every confirmation is declined and every prompt cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessUi;

#[async_trait]
impl UiAdapter for HeadlessUi {
    async fn confirm(&self, _message: &str) -> bool {
        false
    }

    async fn prompt_text(&self, _title: &str, _placeholder: &str, _default: &str) -> Option<String> {
        None
    }

    fn show_context_menu(&self, _position: MenuPosition, _path: &str, _items: &[MenuItem]) {}
}

/// UI answering from pre-queued responses and recording what it was asked.
///
/// Once a queue runs dry, confirmations are declined and prompts cancelled.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    confirms: Mutex<VecDeque<bool>>,
    prompts: Mutex<VecDeque<Option<String>>>,
    asked: Mutex<Vec<String>>,
    menus: Mutex<Vec<(String, Vec<MenuItem>)>>,
    inline_renames: Mutex<Vec<String>>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirming(self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirms.lock().extend(answers);
        self
    }

    pub fn answering(self, answers: impl IntoIterator<Item = Option<String>>) -> Self {
        self.prompts.lock().extend(answers);
        self
    }

    pub fn push_confirm(&self, answer: bool) {
        self.confirms.lock().push_back(answer);
    }

    pub fn push_prompt(&self, answer: Option<String>) {
        self.prompts.lock().push_back(answer);
    }

    /// Every confirm message and prompt title, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }

    pub fn menus(&self) -> Vec<(String, Vec<MenuItem>)> {
        self.menus.lock().clone()
    }

    pub fn inline_renames(&self) -> Vec<String> {
        self.inline_renames.lock().clone()
    }
}

#[async_trait]
impl UiAdapter for ScriptedUi {
    async fn confirm(&self, message: &str) -> bool {
        self.asked.lock().push(message.to_string());
        self.confirms.lock().pop_front().unwrap_or(false)
    }

    async fn prompt_text(&self, title: &str, _placeholder: &str, _default: &str) -> Option<String> {
        self.asked.lock().push(title.to_string());
        self.prompts.lock().pop_front().flatten()
    }

    fn show_context_menu(&self, _position: MenuPosition, path: &str, items: &[MenuItem]) {
        self.menus.lock().push((path.to_string(), items.to_vec()));
    }

    fn begin_inline_rename(&self, path: &str) {
        self.inline_renames.lock().push(path.to_string());
    }
}

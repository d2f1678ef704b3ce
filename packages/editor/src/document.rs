//! # Document Store
//!
//! The single stateful coordinator of an editing session.
//!
//! A `DocumentStore` owns the undo stack (whose current snapshot *is* the
//! page), the selection, the clipboard, and the id generator. Every action
//! goes through here:
//!
//! ```text
//! gesture → action → pure tree mutation → record snapshot → reconcile selection
//! ```
//!
//! Actions are synchronous and take `&mut self`, so no caller can observe a
//! half-applied change. An action that turns out to be a no-op records
//! nothing.

use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementKind};
use crate::errors::EditorError;
use crate::id_generator::IdGenerator;
use crate::mutations::{self, Change, ElementPatch, Geometry, LayerDirection};
use crate::templates::Template;
use crate::tree::ElementTree;
use crate::undo_stack::UndoStack;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    history: UndoStack,
    selection: Option<ElementId>,
    clipboard: Option<Element>,
    ids: IdGenerator,
    config: EditorConfig,
}

impl DocumentStore {
    /// Empty page
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: UndoStack::with_max_levels(config.history_limit),
            selection: None,
            clipboard: None,
            ids: IdGenerator::new(&config.session),
            config,
        }
    }

    /// Continue editing an existing page. The loaded tree becomes the
    /// oldest undo state.
    pub fn with_tree(tree: ElementTree, config: EditorConfig) -> Self {
        let mut ids = IdGenerator::new(&config.session);
        ids.reserve(&tree);
        Self {
            history: UndoStack::with_initial(tree, config.history_limit),
            selection: None,
            clipboard: None,
            ids,
            config,
        }
    }

    pub fn tree(&self) -> &ElementTree {
        self.history.current()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected element itself
    pub fn selected(&self) -> Option<&Element> {
        self.selection.as_deref().and_then(|id| self.tree().find(id))
    }

    pub fn clipboard(&self) -> Option<&Element> {
        self.clipboard.as_ref()
    }

    /// Fresh id from this session's generator
    pub fn new_id(&mut self) -> ElementId {
        self.ids.new_id()
    }

    /// Create an element of `kind` with palette defaults and insert it at the
    /// root or into `parent_id`. Returns the new element's id.
    pub fn insert_from_palette(
        &mut self,
        kind: ElementKind,
        parent_id: Option<&str>,
    ) -> Result<ElementId, EditorError> {
        let element = Element::palette(self.ids.new_id(), kind);
        let id = element.id().to_string();
        self.add_element(element, parent_id)?;
        Ok(id)
    }

    /// Insert a caller-built element. Its ids must not already be in use.
    pub fn add_element(&mut self, element: Element, parent_id: Option<&str>) -> Result<(), EditorError> {
        let kind = element.kind();
        let id = element.id().to_string();
        self.ids.reserve_element(&element);

        match mutations::insert(self.tree(), element, parent_id) {
            Ok(next) => {
                debug!(element_id = %id, kind = %kind, parent_id = ?parent_id, "Inserted element");
                self.commit(next, &format!("Insert {}", kind));
                Ok(())
            }
            Err(err) => {
                warn!(element_id = %id, parent_id = ?parent_id, error = %err, "Rejected insert");
                Err(err.into())
            }
        }
    }

    /// Append every root of `template` with regenerated ids, as one undo step.
    /// Returns the ids of the inserted roots.
    pub fn insert_template(&mut self, template: &Template) -> Result<Vec<ElementId>, EditorError> {
        let mut next = self.tree().clone();
        let mut inserted = Vec::with_capacity(template.elements.len());

        for element in template.instantiate(&mut self.ids) {
            inserted.push(element.id().to_string());
            next = mutations::insert(&next, element, None)?;
        }

        if inserted.is_empty() {
            return Ok(inserted);
        }

        info!(template = %template.id, roots = inserted.len(), "Inserted template");
        self.commit(next, &format!("Insert template {}", template.name));
        Ok(inserted)
    }

    /// Property-panel edit. Returns whether the tree changed.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        let change = mutations::update(self.tree(), id, patch);
        self.apply(change, id, "Update element")
    }

    /// Canvas drag/resize. Locked elements ignore it.
    pub fn transform_element(&mut self, id: &str, geometry: &Geometry) -> bool {
        let change = mutations::transform(self.tree(), id, geometry);
        self.apply(change, id, "Move element")
    }

    pub fn toggle_lock(&mut self, id: &str) -> bool {
        let Some(locked) = self.tree().find(id).map(|el| el.locked) else {
            return false;
        };
        let label = if locked { "Unlock element" } else { "Lock element" };
        let change = mutations::update(self.tree(), id, &ElementPatch::locked(!locked));
        self.apply(change, id, label)
    }

    /// Remove an element and its subtree. A selection inside the removed
    /// subtree is cleared.
    pub fn delete_element(&mut self, id: &str) -> bool {
        let change = mutations::remove(self.tree(), id);
        self.apply(change, id, "Delete element")
    }

    /// Apply a new root order coming from the layers panel
    pub fn reorder_root(&mut self, order: &[ElementId]) -> Result<bool, EditorError> {
        match mutations::reorder(self.tree(), order) {
            Ok(change) => Ok(self.apply(change, "<root>", "Reorder layers")),
            Err(err) => {
                warn!(error = %err, "Rejected reorder");
                Err(err.into())
            }
        }
    }

    /// Clone an element next to its root. Returns the clone's id.
    pub fn duplicate_element(&mut self, id: &str) -> Option<ElementId> {
        let offset = self.config.duplicate_offset;
        let (next, copy_id) = mutations::duplicate(self.history.current(), id, &mut self.ids, offset)?;
        debug!(element_id = %id, copy_id = %copy_id, "Duplicated element");
        self.commit(next, "Duplicate element");
        Some(copy_id)
    }

    pub fn move_layer(&mut self, id: &str, direction: LayerDirection) -> bool {
        let change = mutations::move_layer(self.tree(), id, direction);
        self.apply(change, id, "Move layer")
    }

    /// Select an element, or clear the selection with `None`. Selecting an
    /// unknown id clears the selection and returns false.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.tree().contains(id) => {
                self.selection = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(element_id = %id, "Ignoring selection of unknown element");
                self.selection = None;
                false
            }
            None => {
                self.selection = None;
                true
            }
        }
    }

    /// Deep-copy the selected element into the clipboard
    pub fn copy(&mut self) -> bool {
        let Some(selected) = self.selected().cloned() else {
            return false;
        };
        debug!(element_id = %selected.id(), "Copied element");
        self.clipboard = Some(selected);
        true
    }

    /// Copy the selection, then delete it
    pub fn cut(&mut self) -> bool {
        if !self.copy() {
            return false;
        }
        match self.selection.clone() {
            Some(id) => self.delete_element(&id),
            None => false,
        }
    }

    /// Append a fresh-id, offset copy of the clipboard at the root. Returns
    /// the new element's id.
    pub fn paste(&mut self) -> Option<ElementId> {
        let clipboard = self.clipboard.as_ref()?;
        let copy = mutations::clone_with_offset(clipboard, &mut self.ids, self.config.duplicate_offset);
        let copy_id = copy.id().to_string();

        match mutations::insert(self.tree(), copy, None) {
            Ok(next) => {
                debug!(element_id = %copy_id, "Pasted element");
                self.commit(next, "Paste element");
                Some(copy_id)
            }
            Err(err) => {
                warn!(error = %err, "Rejected paste");
                None
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        debug!(cursor = self.history.cursor(), "Undo");
        self.reconcile_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        debug!(cursor = self.history.cursor(), "Redo");
        self.reconcile_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn apply(&mut self, change: Change, id: &str, label: &str) -> bool {
        match change {
            Change::Applied(next) => {
                debug!(element_id = %id, action = label, "Applied change");
                self.commit(next, label);
                true
            }
            Change::Noop => {
                debug!(element_id = %id, action = label, "No-op");
                false
            }
        }
    }

    fn commit(&mut self, next: ElementTree, label: &str) {
        self.history.record(next, Some(label));
        self.reconcile_selection();
    }

    /// Drop a selection that no longer points into the tree
    fn reconcile_selection(&mut self) {
        let stale = self
            .selection
            .as_deref()
            .is_some_and(|id| !self.history.current().contains(id));
        if stale {
            self.selection = None;
        }
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

//! # Tree Mutations
//!
//! Pure operations on an [`ElementTree`]. Every function borrows the input
//! tree and builds a new one; the input is never modified, so a tree that was
//! recorded in history stays exactly as it was.
//!
//! ## Outcomes
//!
//! - Hard failures (`insert` into a missing or leaf parent, `reorder` with a
//!   payload that is not a permutation of the roots) come back as
//!   [`TreeError`].
//! - Soft misses (unknown id for update/remove/duplicate/move) come back as
//!   [`Change::Noop`]. Double-clicking delete is not an error.
//! - An operation that would leave the tree identical is also a `Noop`, so
//!   callers never record empty undo steps.

use crate::element::{find_in_mut, Element, ElementId};
use crate::errors::TreeError;
use crate::id_generator::IdGenerator;
use crate::style::{Style, StyleProperty, StyleValue};
use crate::tree::ElementTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of a soft operation
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Change {
    /// The operation produced a different tree
    Applied(ElementTree),
    /// Nothing to do; the input tree stands
    Noop,
}

impl Change {
    pub fn is_noop(&self) -> bool {
        matches!(self, Change::Noop)
    }

    pub fn applied(self) -> Option<ElementTree> {
        match self {
            Change::Applied(tree) => Some(tree),
            Change::Noop => None,
        }
    }

    /// The resulting tree, falling back to `original` for a no-op
    pub fn or_original(self, original: &ElementTree) -> ElementTree {
        self.applied().unwrap_or_else(|| original.clone())
    }
}

/// Partial update from the property panel.
///
/// `content` and `locked` replace the current value. `style` is merged key by
/// key into the existing style, so sending only `color` keeps `padding`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn style(style: Style) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.style.is_none() && self.locked.is_none()
    }

    /// Apply to an element, reporting whether anything changed
    fn apply_to(&self, element: &mut Element) -> bool {
        let mut changed = false;

        if let Some(content) = &self.content {
            if element.content.as_ref() != Some(content) {
                element.content = Some(content.clone());
                changed = true;
            }
        }

        if let Some(style) = &self.style {
            let merged = element.style.merged(style);
            if merged != element.style {
                element.style = merged;
                changed = true;
            }
        }

        if let Some(locked) = self.locked {
            if element.locked != locked {
                element.locked = locked;
                changed = true;
            }
        }

        changed
    }
}

/// Position and size from a canvas drag or resize
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl Geometry {
    /// Drag stop: new position in pixels
    pub fn moved_to(x: i64, y: i64) -> Self {
        Self {
            left: Some(format!("{}px", x)),
            top: Some(format!("{}px", y)),
            ..Self::default()
        }
    }

    /// Resize stop: new size and position in pixels
    pub fn resized_to(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            left: Some(format!("{}px", x)),
            top: Some(format!("{}px", y)),
            width: Some(format!("{}px", width)),
            height: Some(format!("{}px", height)),
        }
    }

    fn to_style(&self) -> Style {
        [
            (StyleProperty::Left, &self.left),
            (StyleProperty::Top, &self.top),
            (StyleProperty::Width, &self.width),
            (StyleProperty::Height, &self.height),
        ]
        .into_iter()
        .filter_map(|(property, value)| {
            value
                .as_ref()
                .map(|v| (property, StyleValue::Text(v.clone())))
        })
        .collect()
    }
}

/// Stacking moves for root-level elements. The end of the root list is the
/// front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    /// One step towards the front
    Up,
    /// One step towards the back
    Down,
    /// All the way to the front
    Top,
    /// All the way to the back
    Bottom,
}

/// Append `element` to the root list, or to the children of `parent_id`.
///
/// Fails with `InvalidTarget` when the parent is missing or is a leaf kind,
/// and with `DuplicateId` when the new subtree reuses an id already in the
/// tree (or repeats one internally).
pub fn insert(
    tree: &ElementTree,
    element: Element,
    parent_id: Option<&str>,
) -> Result<ElementTree, TreeError> {
    check_fresh_ids(tree, &element)?;

    let mut next = tree.clone();
    match parent_id {
        None => next.roots_mut().push(element),
        Some(parent_id) => {
            let parent = find_in_mut(next.roots_mut(), parent_id).ok_or_else(|| {
                TreeError::InvalidTarget {
                    parent_id: parent_id.to_string(),
                    reason: "not found".to_string(),
                }
            })?;
            let kind = parent.kind();
            let children = parent.children_mut().ok_or_else(|| TreeError::InvalidTarget {
                parent_id: parent_id.to_string(),
                reason: format!("{} elements cannot have children", kind),
            })?;
            children.push(element);
        }
    }

    Ok(next)
}

fn check_fresh_ids(tree: &ElementTree, element: &Element) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    for node in element.descendants() {
        if !seen.insert(node.id()) || tree.contains(node.id()) {
            return Err(TreeError::DuplicateId(node.id().to_string()));
        }
    }
    Ok(())
}

/// Depth-first pre-order lookup
pub fn find<'a>(tree: &'a ElementTree, id: &str) -> Option<&'a Element> {
    tree.find(id)
}

/// Apply a property-panel patch to the element with `id`
pub fn update(tree: &ElementTree, id: &str, patch: &ElementPatch) -> Change {
    let mut next = tree.clone();
    let changed = find_in_mut(next.roots_mut(), id).is_some_and(|element| patch.apply_to(element));
    if changed {
        Change::Applied(next)
    } else {
        Change::Noop
    }
}

/// Move or resize from the canvas. Locked elements keep their geometry.
pub fn transform(tree: &ElementTree, id: &str, geometry: &Geometry) -> Change {
    match tree.find(id) {
        Some(element) if !element.locked => {
            update(tree, id, &ElementPatch::style(geometry.to_style()))
        }
        _ => Change::Noop,
    }
}

/// Remove the element with `id` and its whole subtree
pub fn remove(tree: &ElementTree, id: &str) -> Change {
    let mut next = tree.clone();
    match remove_from(next.roots_mut(), id) {
        Some(_) => Change::Applied(next),
        None => Change::Noop,
    }
}

fn remove_from(elements: &mut Vec<Element>, id: &str) -> Option<Element> {
    if let Some(pos) = elements.iter().position(|el| el.id() == id) {
        return Some(elements.remove(pos));
    }

    for element in elements.iter_mut() {
        if let Some(children) = element.children_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }

    None
}

/// Deep copy of `element` where every node of the subtree gets a fresh id
pub fn regenerate_ids(element: &Element, ids: &mut IdGenerator) -> Element {
    fn assign(element: &mut Element, ids: &mut IdGenerator) {
        element.set_id(ids.new_id());
        if let Some(children) = element.children_mut() {
            for child in children {
                assign(child, ids);
            }
        }
    }

    let mut copy = element.clone();
    assign(&mut copy, ids);
    copy
}

/// Fresh-id copy shifted by `offset` on `left`/`top`, as used for duplicate
/// and paste
pub fn clone_with_offset(element: &Element, ids: &mut IdGenerator, offset: i64) -> Element {
    let mut copy = regenerate_ids(element, ids);
    copy.offset_position(offset);
    copy
}

/// Clone the element with `id` (fresh ids, shifted position) into the root
/// list right after the root it lives under. Nested sources are promoted to
/// root level. Returns the new tree and the clone's id, or `None` when
/// the source is missing or a generated id is already taken.
pub fn duplicate(
    tree: &ElementTree,
    id: &str,
    ids: &mut IdGenerator,
    offset: i64,
) -> Option<(ElementTree, ElementId)> {
    let root_pos = tree.roots().iter().position(|root| root.contains(id))?;
    let source = tree.find(id)?;

    let copy = clone_with_offset(source, ids, offset);
    check_fresh_ids(tree, &copy).ok()?;
    let copy_id = copy.id().to_string();

    let mut next = tree.clone();
    next.roots_mut().insert(root_pos + 1, copy);
    Some((next, copy_id))
}

/// Replace the root order with a permutation of the current root ids
pub fn reorder(tree: &ElementTree, order: &[ElementId]) -> Result<Change, TreeError> {
    let current = tree.root_ids();
    if order.len() != current.len() {
        return Err(TreeError::InvalidReorder(format!(
            "expected {} root ids, got {}",
            current.len(),
            order.len()
        )));
    }

    let mut expected: Vec<&str> = current.iter().map(String::as_str).collect();
    let mut given: Vec<&str> = order.iter().map(String::as_str).collect();
    expected.sort_unstable();
    given.sort_unstable();
    if expected != given {
        return Err(TreeError::InvalidReorder(
            "ids do not match the current root elements".to_string(),
        ));
    }

    if current.as_slice() == order {
        return Ok(Change::Noop);
    }

    let mut slots: Vec<Option<Element>> = tree.roots().iter().cloned().map(Some).collect();
    let mut roots = Vec::with_capacity(order.len());
    for id in order {
        let slot = current
            .iter()
            .position(|root_id| root_id == id)
            .and_then(|index| slots[index].take());
        match slot {
            Some(element) => roots.push(element),
            None => return Err(TreeError::InvalidReorder(format!("{} listed twice", id))),
        }
    }

    Ok(Change::Applied(ElementTree::from_roots(roots)?))
}

/// Restack a root-level element. Nested elements, unknown ids, and steps
/// past either end of the list are no-ops.
pub fn move_layer(tree: &ElementTree, id: &str, direction: LayerDirection) -> Change {
    let Some(index) = tree.root_index(id) else {
        return Change::Noop;
    };
    let last = tree.roots().len() - 1;

    let target = match direction {
        LayerDirection::Up if index < last => index + 1,
        LayerDirection::Down if index > 0 => index - 1,
        LayerDirection::Top => last,
        LayerDirection::Bottom => 0,
        LayerDirection::Up | LayerDirection::Down => return Change::Noop,
    };

    if target == index {
        return Change::Noop;
    }

    let mut next = tree.clone();
    let roots = next.roots_mut();
    let element = roots.remove(index);
    roots.insert(target, element);
    Change::Applied(next)
}

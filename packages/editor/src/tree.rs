//! # Element Tree
//!
//! The page content: an ordered list of root elements, each owning its
//! subtree. Later roots paint on top of earlier ones.

use crate::element::{Descendants, Element, ElementId};
use crate::errors::{EditorError, TreeError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ElementTree {
    roots: Vec<Element>,
}

impl ElementTree {
    /// Empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from root elements, rejecting repeated ids
    pub fn from_roots(roots: Vec<Element>) -> Result<Self, TreeError> {
        let tree = Self { roots };
        tree.check_invariants()?;
        Ok(tree)
    }

    /// Parse a page from its JSON form (an array of root elements)
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<Element> {
        &mut self.roots
    }

    pub fn root_ids(&self) -> Vec<ElementId> {
        self.roots.iter().map(|el| el.id().to_string()).collect()
    }

    /// Position of `id` in the root list, if it is a root
    pub fn root_index(&self, id: &str) -> Option<usize> {
        self.roots.iter().position(|el| el.id() == id)
    }

    /// Every node, depth-first pre-order
    pub fn iter(&self) -> Descendants<'_> {
        Descendants {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Total node count, nested nodes included
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.iter().find(|el| el.id() == id)
    }

    /// Index path from the root list down to `id`
    pub fn find_path(&self, id: &str) -> Option<Vec<usize>> {
        fn walk(elements: &[Element], id: &str, path: &mut Vec<usize>) -> bool {
            for (index, element) in elements.iter().enumerate() {
                path.push(index);
                if element.id() == id {
                    return true;
                }
                if let Some(children) = element.children() {
                    if walk(children, id, path) {
                        return true;
                    }
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.roots, id, &mut path).then_some(path)
    }

    /// Id of the container holding `id`. `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.iter()
            .find(|el| {
                el.children()
                    .is_some_and(|children| children.iter().any(|c| c.id() == id))
            })
            .map(Element::id)
    }

    /// Check id uniqueness and the container/leaf children rule
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::new();
        for element in self.iter() {
            if !seen.insert(element.id()) {
                return Err(TreeError::DuplicateId(element.id().to_string()));
            }
            if element.children().is_some() != element.is_container() {
                return Err(TreeError::Structure(format!(
                    "{} element {} has mismatched children",
                    element.kind(),
                    element.id()
                )));
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for ElementTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roots = Vec::<Element>::deserialize(deserializer)?;
        ElementTree::from_roots(roots).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a ElementTree {
    type Item = &'a Element;
    type IntoIter = Descendants<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! # Template Library
//!
//! Pre-built sections (hero, feature cards, call to action) that can be
//! dropped onto the page. Template element ids are placeholders: every id in
//! every subtree is regenerated when a template is instantiated.

use crate::element::Element;
use crate::errors::EditorError;
use crate::id_generator::IdGenerator;
use crate::mutations::regenerate_ids;
use serde::{Deserialize, Serialize};
use tracing::debug;

const BUILTIN_TEMPLATES: &str = include_str!("../templates/builtin.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    pub elements: Vec<Element>,
}

impl Template {
    /// Copies of the template roots with fresh ids through the full depth
    pub fn instantiate(&self, ids: &mut IdGenerator) -> Vec<Element> {
        self.elements
            .iter()
            .map(|element| regenerate_ids(element, ids))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl TemplateLibrary {
    /// Templates shipped with the editor
    pub fn builtin() -> Result<Self, EditorError> {
        Self::from_json(BUILTIN_TEMPLATES)
    }

    /// Load a JSON array of templates
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let templates: Vec<Template> = serde_json::from_str(json)?;
        debug!(count = templates.len(), "Loaded template library");
        Ok(Self { templates })
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Like [`get`](Self::get) but with an error for unknown ids
    pub fn require(&self, id: &str) -> Result<&Template, EditorError> {
        self.get(id)
            .ok_or_else(|| EditorError::TemplateNotFound(id.to_string()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Distinct categories in library order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for template in &self.templates {
            if !categories.contains(&template.category.as_str()) {
                categories.push(&template.category);
            }
        }
        categories
    }

    pub fn push(&mut self, template: Template) {
        self.templates.push(template);
    }
}

//! # Element Model
//!
//! A page is an ordered list of root [`Element`]s. Container kinds
//! (`section`, `container`, `column`) always carry a `children` list, leaf
//! kinds never do. The `children` field is private and every way of building
//! an element (constructors and deserialization) enforces that rule, so a leaf
//! can't grow children after the fact.

use crate::errors::TreeError;
use crate::style::{Style, StyleProperty};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque element identifier, unique within a session
pub type ElementId = String;

/// Closed set of element types offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Section,
    Container,
    Column,
    Heading,
    Text,
    Button,
    Image,
    Input,
    Textarea,
}

impl ElementKind {
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Section,
        ElementKind::Container,
        ElementKind::Column,
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Input,
        ElementKind::Textarea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Section => "section",
            ElementKind::Container => "container",
            ElementKind::Column => "column",
            ElementKind::Heading => "heading",
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Input => "input",
            ElementKind::Textarea => "textarea",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether elements of this kind hold children
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::Section | ElementKind::Container | ElementKind::Column
        )
    }

    /// What gets rendered when the element has no content of its own.
    /// For images this is the source URL, for form fields the placeholder.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            ElementKind::Heading => Some("Heading"),
            ElementKind::Text => Some("Text content"),
            ElementKind::Button => Some("Button"),
            ElementKind::Image => Some("https://via.placeholder.com/400x300"),
            ElementKind::Input | ElementKind::Textarea => Some("Enter text..."),
            ElementKind::Section | ElementKind::Container | ElementKind::Column => None,
        }
    }

    /// Content a fresh palette element starts with
    pub fn palette_content(self) -> Option<&'static str> {
        match self {
            ElementKind::Heading => Some("Your Awesome Heading"),
            ElementKind::Text => Some("Add your text content here. Double click to edit."),
            ElementKind::Button => Some("Click Me"),
            ElementKind::Image => {
                Some("https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?w=800")
            }
            _ => None,
        }
    }

    /// Style a fresh palette element starts with
    pub fn palette_style(self) -> Style {
        match self {
            ElementKind::Section => Style::new().with("padding", "40px 20px"),
            ElementKind::Container => Style::new()
                .with("backgroundColor", "#f9fafb")
                .with("padding", "20px")
                .with("borderRadius", "8px"),
            ElementKind::Column => Style::new()
                .with("display", "flex")
                .with("flexDirection", "column")
                .with("flex", "1")
                .with("padding", "12px"),
            ElementKind::Heading => Style::new()
                .with("fontSize", "32px")
                .with("fontWeight", "bold")
                .with("color", "#1f2937"),
            ElementKind::Text => Style::new().with("fontSize", "16px").with("color", "#4b5563"),
            ElementKind::Button => Style::new()
                .with("backgroundColor", "#3b82f6")
                .with("color", "#ffffff")
                .with("padding", "12px 24px")
                .with("borderRadius", "6px"),
            ElementKind::Image => Style::new()
                .with("width", "100%")
                .with("height", "auto")
                .with("borderRadius", "8px"),
            ElementKind::Input | ElementKind::Textarea => Style::new()
                .with("padding", "8px 12px")
                .with("border", "1px solid #d1d5db")
                .with("borderRadius", "6px"),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawElement")]
pub struct Element {
    id: ElementId,

    #[serde(rename = "type")]
    kind: ElementKind,

    /// Display text, image URL, or form placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub style: Style,

    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Element>>,

    /// Locked elements ignore canvas drag/resize but stay editable
    #[serde(skip_serializing_if = "is_false")]
    pub locked: bool,
}

/// Wire form of [`Element`], validated on the way in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    style: Style,
    #[serde(default)]
    children: Option<Vec<Element>>,
    #[serde(default)]
    locked: bool,
}

impl TryFrom<RawElement> for Element {
    type Error = TreeError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let children = match (raw.kind.is_container(), raw.children) {
            (true, children) => Some(children.unwrap_or_default()),
            (false, None) => None,
            (false, Some(_)) => {
                return Err(TreeError::Structure(format!(
                    "{} element {} cannot have children",
                    raw.kind, raw.id
                )))
            }
        };

        Ok(Self {
            id: raw.id,
            kind: raw.kind,
            content: raw.content,
            style: raw.style,
            children,
            locked: raw.locked,
        })
    }
}

impl Element {
    /// Create an empty element. Containers start with an empty child list.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: None,
            style: Style::default(),
            children: kind.is_container().then(Vec::new),
            locked: false,
        }
    }

    /// Create an element carrying the palette defaults for its kind
    pub fn palette(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        let mut element = Self::new(id, kind);
        element.content = kind.palette_content().map(str::to_string);
        element.style = kind.palette_style();
        element
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the children of a container. Fails for leaf kinds.
    pub fn with_children(mut self, children: Vec<Element>) -> Result<Self, TreeError> {
        match self.children.as_mut() {
            Some(slot) => {
                *slot = children;
                Ok(self)
            }
            None => Err(TreeError::Structure(format!(
                "{} element {} cannot have children",
                self.kind, self.id
            ))),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Children of a container, `None` for leaf kinds
    pub fn children(&self) -> Option<&[Element]> {
        self.children.as_deref()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        self.children.as_mut()
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    /// Content to render: own content if non-empty, else the kind placeholder
    pub fn display_content(&self) -> Option<&str> {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => Some(content),
            _ => self.kind.placeholder(),
        }
    }

    /// Depth-first pre-order walk over this element and its descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.descendants().find(|el| el.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        find_in_mut(self.children.as_deref_mut()?, id)
    }

    /// Whether `id` is this element or one of its descendants
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of nodes in this subtree, including the root
    pub fn subtree_len(&self) -> usize {
        self.descendants().count()
    }

    /// Horizontal/vertical position shift used by duplicate and paste
    pub(crate) fn offset_position(&mut self, delta: i64) {
        self.style.offset(&StyleProperty::Left, delta);
        self.style.offset(&StyleProperty::Top, delta);
    }
}

pub(crate) fn find_in_mut<'a>(elements: &'a mut [Element], id: &str) -> Option<&'a mut Element> {
    for element in elements {
        if let Some(found) = element.find_mut(id) {
            return Some(found);
        }
    }
    None
}

/// Pre-order iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    pub(crate) stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        if let Some(children) = next.children.as_deref() {
            self.stack.extend(children.iter().rev());
        }
        Some(next)
    }
}

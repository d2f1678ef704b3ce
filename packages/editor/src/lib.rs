//! # Pagecraft Editor
//!
//! Core document model and editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas / layers panel / property panel      │
//! └─────────────────────────────────────────────┘
//!                     ↓ actions
//! ┌─────────────────────────────────────────────┐
//! │ document: DocumentStore                     │
//! │  - Selection and clipboard                  │
//! │  - Id generation                            │
//! │  - Records every change in the undo stack   │
//! └─────────────────────────────────────────────┘
//!                     ↓ pure functions
//! ┌─────────────────────────────────────────────┐
//! │ mutations: ElementTree → ElementTree        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: ElementTree → HTML / React       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: exported code is a derived view
//! 2. **Mutations are pure**: they return a new tree or report a no-op
//! 3. **Snapshots are immutable**: history never aliases the live tree
//! 4. **Ids are unique**: across the whole tree, at every point in history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{DocumentStore, EditorConfig, ElementKind, ElementPatch};
//!
//! let mut store = DocumentStore::new(EditorConfig::default());
//! let section = store.insert_from_palette(ElementKind::Section, None)?;
//! let heading = store.insert_from_palette(ElementKind::Heading, Some(&section))?;
//!
//! store.update_element(&heading, &ElementPatch::content("Welcome"));
//! store.undo();
//!
//! let json = store.tree().to_json_pretty()?;
//! ```

mod config;
mod document;
mod element;
mod errors;
mod id_generator;
mod mutations;
mod style;
mod templates;
mod tree;
mod undo_stack;

pub use config::EditorConfig;
pub use document::DocumentStore;
pub use element::{Descendants, Element, ElementId, ElementKind};
pub use errors::{EditorError, TreeError};
pub use id_generator::{session_seed, IdGenerator};
pub use mutations::{
    clone_with_offset, duplicate, find, insert, move_layer, regenerate_ids, remove, reorder,
    transform, update, Change, ElementPatch, Geometry, LayerDirection,
};
pub use style::{Style, StyleProperty, StyleValue};
pub use templates::{Template, TemplateLibrary};
pub use tree::ElementTree;
pub use undo_stack::{Snapshot, UndoStack};

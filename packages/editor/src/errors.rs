//! Error types for the editor

use crate::element::ElementId;
use thiserror::Error;

/// Rejected tree operations. The input tree is never touched when one of
/// these comes back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Invalid target {parent_id}: {reason}")]
    InvalidTarget { parent_id: ElementId, reason: String },

    #[error("Invalid reorder: {0}")]
    InvalidReorder(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(ElementId),

    #[error("Invalid structure: {0}")]
    Structure(String),
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

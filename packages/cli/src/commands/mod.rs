pub mod export;
pub mod init;
pub mod templates;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use templates::{templates, TemplatesArgs};

use anyhow::{Context, Result};
use pagecraft_editor::ElementTree;
use std::fs;
use std::path::Path;

/// Read a page file. A missing file is an empty page.
pub fn read_page(path: &Path) -> Result<ElementTree> {
    if !path.exists() {
        return Ok(ElementTree::new());
    }
    let json = fs::read_to_string(path)?;
    ElementTree::from_json(&json).with_context(|| format!("Invalid page file {}", path.display()))
}

pub fn write_page(path: &Path, tree: &ElementTree) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, tree.to_json_pretty()?)?;
    Ok(())
}

//! HTML export for Pagecraft pages.
//!
//! Two renderings of the same tree walk:
//!
//! - [`compile_to_markup`]: nested markup with every style map as an inline
//!   `style` attribute
//! - [`compile_to_document`]: a standalone page where each distinct style map
//!   becomes a generated class in the `<style>` block

mod compiler;

pub use compiler::{
    compile_to_document, compile_to_markup, declarations, escape_css, escape_html, tag_name, ClassMapper,
    CompileOptions, HtmlDocument,
};

#[cfg(test)]
mod tests;

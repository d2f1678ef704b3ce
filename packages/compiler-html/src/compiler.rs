use pagecraft_editor::{Element, ElementKind, ElementTree, Style};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const BASE_STYLES: &str = "\
body { font-family: Arial, Helvetica, sans-serif; margin: 0; padding: 0; }
.btn { display: inline-block; padding: 10px 14px; border-radius: 6px; background: #0366d6; color: #fff; text-decoration: none; }";

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Document title (standalone documents only)
    pub title: String,
    /// Rules emitted ahead of the generated classes
    pub base_styles: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: "Exported site".to_string(),
            base_styles: BASE_STYLES.to_string(),
        }
    }
}

/// A standalone page and the stylesheet embedded in it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlDocument {
    pub html: String,
    pub styles: String,
}

/// One class per distinct style map, named `c1`, `c2`, … in first-use order
#[derive(Debug, Default)]
pub struct ClassMapper {
    names: HashMap<Style, String>,
    rules: Vec<(String, Style)>,
}

impl ClassMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class for `style`, allocating a new one on first sight
    pub fn class_for(&mut self, style: &Style) -> &str {
        if !self.names.contains_key(style) {
            let name = format!("c{}", self.rules.len() + 1);
            self.rules.push((name.clone(), style.clone()));
            self.names.insert(style.clone(), name);
        }
        &self.names[style]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Class rules in allocation order, safe to embed in a `<style>` block
    pub fn rules(&self) -> impl Iterator<Item = String> + '_ {
        self.rules
            .iter()
            .map(|(name, style)| format!(".{} {{ {}; }}", name, escape_css(&declarations(style))))
    }
}

enum StyleMode {
    Inline,
    Classes(ClassMapper),
}

struct Context {
    options: CompileOptions,
    mode: StyleMode,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions, mode: StyleMode) -> Self {
        Self {
            options,
            mode,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    /// ` style="…"` or ` class="…"`, or nothing for an empty style
    fn style_attribute(&mut self, style: &Style) -> String {
        if style.is_empty() {
            return String::new();
        }
        match &mut self.mode {
            StyleMode::Inline => format!(" style=\"{}\"", escape_html(&declarations(style))),
            StyleMode::Classes(mapper) => format!(" class=\"{}\"", mapper.class_for(style)),
        }
    }

    fn get_output(self) -> (String, StyleMode) {
        (self.buffer, self.mode)
    }
}

/// Compile the tree to nested markup with inline styles
pub fn compile_to_markup(tree: &ElementTree, options: &CompileOptions) -> String {
    let mut ctx = Context::new(options.clone(), StyleMode::Inline);
    for element in tree.roots() {
        compile_element(element, &mut ctx);
    }
    ctx.get_output().0
}

/// Compile the tree to a full HTML page with one generated class per
/// distinct style map
pub fn compile_to_document(tree: &ElementTree, options: &CompileOptions) -> HtmlDocument {
    let mut body = Context::new(options.clone(), StyleMode::Classes(ClassMapper::new()));
    body.depth = 2;
    for element in tree.roots() {
        compile_element(element, &mut body);
    }

    let (markup, mode) = body.get_output();
    let mut styles = escape_css(&options.base_styles);
    if let StyleMode::Classes(mapper) = mode {
        for rule in mapper.rules() {
            if !styles.is_empty() {
                styles.push('\n');
            }
            styles.push_str(&rule);
        }
    }

    let mut ctx = Context::new(options.clone(), StyleMode::Inline);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&styles, &mut ctx);

    ctx.add_line("<body>");
    ctx.add(&markup);
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    HtmlDocument {
        html: ctx.get_output().0,
        styles,
    }
}

fn compile_head(styles: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    ctx.add_line("<style>");
    ctx.indent();
    for line in styles.lines() {
        ctx.add_line(line);
    }
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_element(element: &Element, ctx: &mut Context) {
    let style = ctx.style_attribute(&element.style);

    match element.kind() {
        ElementKind::Section | ElementKind::Container | ElementKind::Column => {
            let tag = tag_name(element.kind());
            let children = element.children().unwrap_or_default();
            if children.is_empty() {
                ctx.add_line(&format!("<{}{}></{}>", tag, style, tag));
                return;
            }

            ctx.add_line(&format!("<{}{}>", tag, style));
            ctx.indent();
            for child in children {
                compile_element(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }

        ElementKind::Image => {
            let src = escape_html(element.display_content().unwrap_or_default());
            ctx.add_line(&format!("<img src=\"{}\" alt=\"Image\"{} />", src, style));
        }

        ElementKind::Input => {
            let placeholder = escape_html(element.display_content().unwrap_or_default());
            ctx.add_line(&format!(
                "<input type=\"text\" placeholder=\"{}\"{} />",
                placeholder, style
            ));
        }

        ElementKind::Textarea => {
            let placeholder = escape_html(element.display_content().unwrap_or_default());
            ctx.add_line(&format!(
                "<textarea placeholder=\"{}\"{}></textarea>",
                placeholder, style
            ));
        }

        kind @ (ElementKind::Heading | ElementKind::Text | ElementKind::Button) => {
            let tag = tag_name(kind);
            let text = escape_html(element.display_content().unwrap_or_default());
            ctx.add_line(&format!("<{}{}>{}</{}>", tag, style, text, tag));
        }
    }
}

/// HTML tag an element kind renders as
pub fn tag_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Section => "section",
        ElementKind::Container | ElementKind::Column => "div",
        ElementKind::Heading => "h1",
        ElementKind::Text => "p",
        ElementKind::Button => "button",
        ElementKind::Image => "img",
        ElementKind::Input => "input",
        ElementKind::Textarea => "textarea",
    }
}

/// `font-size: 48px; color: #fff`
pub fn declarations(style: &Style) -> String {
    style
        .iter()
        .map(|(property, value)| format!("{}: {}", property.css_name(), value))
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Hex-escape `<` so stylesheet text can never close the `<style>` element
pub fn escape_css(text: &str) -> String {
    text.replace('<', "\\3c ")
}

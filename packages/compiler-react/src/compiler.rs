use crate::context::{CompileOptions, CompilerContext};
use pagecraft_editor::{Element, ElementKind, ElementTree, Style, StyleValue};

/// Compile a page to a React function component
pub fn compile_to_react(tree: &ElementTree, options: &CompileOptions) -> String {
    let mut ctx = CompilerContext::new(options.clone());

    ctx.add_line("import React from 'react';");
    ctx.add("\n");

    let return_type = if ctx.options.use_typescript {
        ": JSX.Element"
    } else {
        ""
    };
    let name = component_name(&ctx.options.component_name);
    ctx.add_line(&format!("export default function {}(){} {{", name, return_type));
    ctx.indent();
    ctx.add_line("return (");
    ctx.indent();

    let wrapper = attribute_value(&ctx.options.wrapper_class);
    ctx.add_line(&format!("<div className={}>", wrapper));
    ctx.indent();
    for element in tree.roots() {
        compile_element(element, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</div>");

    ctx.dedent();
    ctx.add_line(");");
    ctx.dedent();
    ctx.add_line("}");

    ctx.get_output()
}

/// PascalCase identifier for the exported component
/// (`landing-page` → `LandingPage`, `404` → `Page404`)
pub fn component_name(name: &str) -> String {
    let pascal: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Page{}", pascal)
    } else {
        pascal
    }
}

fn compile_element(element: &Element, ctx: &mut CompilerContext) {
    let style = style_attribute(&element.style);
    let content = element.display_content().unwrap_or_default();

    match element.kind() {
        ElementKind::Section | ElementKind::Container | ElementKind::Column => {
            let tag = if element.kind() == ElementKind::Section {
                "section"
            } else {
                "div"
            };
            let children = element.children().unwrap_or_default();
            if children.is_empty() {
                ctx.add_line(&format!("<{}{} />", tag, style));
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

        ElementKind::Heading => ctx.add_line(&format!("<h1{}>{}</h1>", style, text(content))),
        ElementKind::Text => ctx.add_line(&format!("<p{}>{}</p>", style, text(content))),
        ElementKind::Button => {
            ctx.add_line(&format!("<button{}>{}</button>", style, text(content)))
        }

        ElementKind::Image => ctx.add_line(&format!(
            "<img src={} alt=\"Generated\"{} />",
            attribute_value(content),
            style
        )),
        ElementKind::Input => ctx.add_line(&format!(
            "<input type=\"text\" placeholder={}{} />",
            attribute_value(content),
            style
        )),
        ElementKind::Textarea => ctx.add_line(&format!(
            "<textarea placeholder={}{} />",
            attribute_value(content),
            style
        )),
    }
}

/// ` style={{ fontSize: '48px', zIndex: 10 }}`, or nothing for an empty style
fn style_attribute(style: &Style) -> String {
    if style.is_empty() {
        return String::new();
    }

    let entries = style
        .iter()
        .map(|(property, value)| {
            let key = property.name();
            let key = if is_identifier(key) {
                key.to_string()
            } else {
                quote(key)
            };
            let value = match value {
                StyleValue::Number(n) => n.to_string(),
                StyleValue::Text(text) => quote(text),
            };
            format!("{}: {}", key, value)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(" style={{{{ {} }}}}", entries)
}

/// Single-quoted JS string literal
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}

/// JSX attribute value: a plain string when it is safe, an expression
/// otherwise
fn attribute_value(value: &str) -> String {
    if value.contains(['"', '\\', '\n', '&']) {
        format!("{{{}}}", json_string(value))
    } else {
        format!("\"{}\"", value)
    }
}

/// JSX child text. Characters JSX treats specially (including `&`, which
/// would start an entity) go through a string expression.
fn text(content: &str) -> String {
    let plain = !content.contains(['{', '}', '<', '>', '&', '\n'])
        && content.trim() == content;
    if plain {
        content.to_string()
    } else {
        format!("{{{}}}", json_string(content))
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

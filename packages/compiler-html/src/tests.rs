use crate::{compile_to_document, compile_to_markup, ClassMapper, CompileOptions};
use pagecraft_editor::{ElementTree, Style};

fn page(json: &str) -> ElementTree {
    ElementTree::from_json(json).expect("Failed to load page")
}

#[test]
fn test_compile_heading_with_inline_style() {
    let tree = page(r##"[{ "id": "h", "type": "heading", "content": "Hello", "style": { "fontSize": "48px", "color": "#fff" } }]"##);
    let html = compile_to_markup(&tree, &CompileOptions::default());

    println!("Generated HTML:\n{}", html);

    assert_eq!(html, "<h1 style=\"color: #fff; font-size: 48px\">Hello</h1>\n");
}

#[test]
fn test_compile_nested_containers() {
    let tree = page(
        r#"[{
            "id": "s", "type": "section", "style": {},
            "children": [
                { "id": "c", "type": "container", "style": { "padding": "20px" },
                  "children": [{ "id": "t", "type": "text", "content": "Body", "style": {} }] },
                { "id": "b", "type": "button", "content": "Go", "style": {} }
            ]
        }]"#,
    );
    let html = compile_to_markup(&tree, &CompileOptions::default());

    println!("Generated HTML:\n{}", html);

    let expected = "\
<section>
  <div style=\"padding: 20px\">
    <p>Body</p>
  </div>
  <button>Go</button>
</section>
";
    assert_eq!(html, expected);
}

#[test]
fn test_compile_leaf_tags() {
    let tree = page(
        r#"[
            { "id": "i", "type": "image", "content": "https://example.com/a.png", "style": {} },
            { "id": "n", "type": "input", "content": "Email", "style": {} },
            { "id": "a", "type": "textarea", "style": {} },
            { "id": "e", "type": "column", "style": {} }
        ]"#,
    );
    let html = compile_to_markup(&tree, &CompileOptions::default());

    assert!(html.contains("<img src=\"https://example.com/a.png\" alt=\"Image\" />"));
    assert!(html.contains("<input type=\"text\" placeholder=\"Email\" />"));
    assert!(html.contains("<textarea placeholder=\"Enter text...\"></textarea>"));
    assert!(html.contains("<div></div>"));
}

#[test]
fn test_empty_content_uses_placeholder() {
    let tree = page(r#"[{ "id": "t", "type": "text", "content": "", "style": {} }, { "id": "b", "type": "button", "style": {} }]"#);
    let html = compile_to_markup(&tree, &CompileOptions::default());

    assert!(html.contains("<p>Text content</p>"));
    assert!(html.contains("<button>Button</button>"));
}

#[test]
fn test_text_is_escaped() {
    let tree = page(r#"[{ "id": "t", "type": "text", "content": "<b>Tom & \"Jerry\"</b>", "style": { "fontFamily": "\"Inter\"" } }]"#);
    let html = compile_to_markup(&tree, &CompileOptions::default());

    assert!(html.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
    assert!(html.contains("style=\"font-family: &quot;Inter&quot;\""));
    assert!(!html.contains("<b>"));
}

#[test]
fn test_compact_output() {
    let tree = page(r#"[{ "id": "s", "type": "section", "style": {}, "children": [{ "id": "t", "type": "text", "content": "x", "style": {} }] }]"#);
    let options = CompileOptions {
        pretty: false,
        ..CompileOptions::default()
    };

    assert_eq!(compile_to_markup(&tree, &options), "<section><p>x</p></section>");
}

#[test]
fn test_document_dedups_classes() {
    let tree = page(
        r#"[
            { "id": "a", "type": "heading", "content": "One", "style": { "color": "red" } },
            { "id": "b", "type": "text", "content": "Two", "style": { "fontSize": "12px" } },
            { "id": "c", "type": "heading", "content": "Three", "style": { "color": "red" } },
            { "id": "d", "type": "text", "content": "Four", "style": {} }
        ]"#,
    );
    let document = compile_to_document(&tree, &CompileOptions::default());

    println!("Generated HTML:\n{}", document.html);

    assert!(document.html.starts_with("<!DOCTYPE html>\n<html>\n"));
    assert!(document.html.contains("<h1 class=\"c1\">One</h1>"));
    assert!(document.html.contains("<p class=\"c2\">Two</p>"));
    assert!(document.html.contains("<h1 class=\"c1\">Three</h1>"));
    assert!(document.html.contains("<p>Four</p>"));
    assert!(!document.html.contains("c3"));

    assert!(document.styles.contains(".c1 { color: red; }"));
    assert!(document.styles.contains(".c2 { font-size: 12px; }"));
    assert!(document.html.contains("<style>"));
    assert!(document.html.contains("      .c2 { font-size: 12px; }"));
}

#[test]
fn test_document_title_and_base_styles() {
    let tree = ElementTree::new();
    let options = CompileOptions {
        title: "Launch <Day>".to_string(),
        base_styles: String::new(),
        ..CompileOptions::default()
    };
    let document = compile_to_document(&tree, &options);

    assert!(document.html.contains("<title>Launch &lt;Day&gt;</title>"));
    assert_eq!(document.styles, "");
    assert!(document.html.contains("<body>\n  </body>"));
}

#[test]
fn test_style_values_cannot_close_style_block() {
    let tree = page(
        r#"[{ "id": "t", "type": "text", "content": "Hi", "style": { "color": "red</style><script>alert(1)</script>" } }]"#,
    );
    let options = CompileOptions {
        base_styles: "p::after { content: '</style>'; }".to_string(),
        ..CompileOptions::default()
    };
    let document = compile_to_document(&tree, &options);

    println!("Generated HTML:\n{}", document.html);

    assert_eq!(document.html.matches("</style>").count(), 1);
    assert!(!document.html.contains("<script>"));
    assert!(document.styles.contains(".c1 { color: red\\3c /style>\\3c script>alert(1)\\3c /script>; }"));
    assert!(document.styles.contains("content: '\\3c /style>'"));
}

#[test]
fn test_output_is_deterministic() {
    let tree = page(
        r##"[{ "id": "s", "type": "section", "style": { "padding": "4px", "margin": "0", "zIndex": 3 },
              "children": [{ "id": "t", "type": "text", "style": { "opacity": "0.5", "color": "#000" } }] }]"##,
    );
    let options = CompileOptions::default();

    assert_eq!(compile_to_markup(&tree, &options), compile_to_markup(&tree, &options));
    assert_eq!(compile_to_document(&tree, &options), compile_to_document(&tree, &options));
    assert!(compile_to_markup(&tree, &options).contains("style=\"padding: 4px; margin: 0; z-index: 3\""));
}

#[test]
fn test_class_mapper_order() {
    let mut mapper = ClassMapper::new();
    let a = Style::new().with("color", "red");
    let b = Style::new().with("color", "blue");

    assert_eq!(mapper.class_for(&b), "c1");
    assert_eq!(mapper.class_for(&a), "c2");
    assert_eq!(mapper.class_for(&b), "c1");
    assert_eq!(mapper.len(), 2);
    assert_eq!(
        mapper.rules().collect::<Vec<_>>(),
        vec![".c1 { color: blue; }", ".c2 { color: red; }"]
    );
}

#[test]
fn test_options_from_config_json() {
    let options: CompileOptions = serde_json::from_str(r#"{ "pretty": false, "title": "Shop" }"#).unwrap();
    assert!(!options.pretty);
    assert_eq!(options.title, "Shop");
    assert_eq!(options.indent, "  ");
}

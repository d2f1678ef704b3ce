//! Integration tests for the editor crate
//!
//! Drives the document store through the same sequences the canvas, the
//! layers panel and the property panel produce.

use pagecraft_editor::{
    DocumentStore, EditorConfig, Element, ElementKind, ElementPatch, ElementTree, Geometry,
    LayerDirection, Style, StyleProperty, StyleValue, TemplateLibrary,
};
use std::collections::HashSet;

fn store() -> DocumentStore {
    DocumentStore::new(EditorConfig::with_session("integration"))
}

fn style_of<'a>(store: &'a DocumentStore, id: &str) -> &'a Style {
    &store.tree().find(id).unwrap().style
}

#[test]
fn test_insert_heading_at_root() {
    let mut store = store();
    let id = store.new_id();
    let heading = Element::new(id.clone(), ElementKind::Heading).with_content("Hello");
    store.add_element(heading, None).unwrap();

    let roots = store.tree().roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].kind(), ElementKind::Heading);
    assert_eq!(roots[0].content.as_deref(), Some("Hello"));

    let json = serde_json::to_value(store.tree()).unwrap();
    assert!(json[0].get("children").is_none());
    assert_eq!(json[0]["type"], "heading");
}

#[test]
fn test_insert_into_container() {
    let mut store = store();
    let container = store.insert_from_palette(ElementKind::Container, None).unwrap();
    let text = store
        .insert_from_palette(ElementKind::Text, Some(&container))
        .unwrap();

    let children = store.tree().find(&container).unwrap().children().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id(), text);
    assert_eq!(store.tree().parent_of(&text), Some(container.as_str()));
}

#[test]
fn test_style_update_merges() {
    let mut store = store();
    let id = store.new_id();
    let heading = Element::new(id.clone(), ElementKind::Heading)
        .with_style(Style::new().with("fontSize", "48px"));
    store.add_element(heading, None).unwrap();

    let patch = ElementPatch::style(Style::new().with("color", "#ff0000"));
    assert!(store.update_element(&id, &patch));

    let style = style_of(&store, &id);
    assert_eq!(style.get(&StyleProperty::FontSize), Some(&StyleValue::from("48px")));
    assert_eq!(style.get(&StyleProperty::Color), Some(&StyleValue::from("#ff0000")));

    // Same patch again changes nothing
    assert!(!store.update_element(&id, &patch));
    assert_eq!(store.history().undo_levels(), 2);
}

#[test]
fn test_three_inserts_two_undos() {
    let mut store = store();
    let first = store.insert_from_palette(ElementKind::Heading, None).unwrap();
    store.insert_from_palette(ElementKind::Text, None).unwrap();
    store.insert_from_palette(ElementKind::Button, None).unwrap();

    assert!(store.undo());
    assert!(store.undo());

    assert_eq!(store.tree().root_ids(), vec![first]);
    assert!(store.can_redo());
}

#[test]
fn test_move_layer_to_top() {
    let mut store = store();
    let a = store.insert_from_palette(ElementKind::Section, None).unwrap();
    let b = store.insert_from_palette(ElementKind::Text, None).unwrap();
    let c = store.insert_from_palette(ElementKind::Image, None).unwrap();

    assert!(store.move_layer(&a, LayerDirection::Top));
    assert_eq!(store.tree().root_ids(), vec![b.clone(), c.clone(), a.clone()]);

    assert!(!store.move_layer(&a, LayerDirection::Up));
    assert!(store.move_layer(&a, LayerDirection::Bottom));
    assert_eq!(store.tree().root_ids(), vec![a, b, c]);
}

#[test]
fn test_duplicate_shifts_position() {
    let mut store = store();
    let id = store.new_id();
    let original = Element::new(id.clone(), ElementKind::Button)
        .with_style(Style::new().with("left", "100px").with("top", "40px"));
    store.add_element(original.clone(), None).unwrap();

    let copy = store.duplicate_element(&id).unwrap();
    assert_ne!(copy, id);

    let copy_style = style_of(&store, &copy);
    assert_eq!(copy_style.get(&StyleProperty::Left), Some(&StyleValue::from("120px")));
    assert_eq!(copy_style.get(&StyleProperty::Top), Some(&StyleValue::from("60px")));
    assert_eq!(store.tree().find(&id), Some(&original));
    assert_eq!(store.tree().root_ids(), vec![id, copy]);
}

#[test]
fn test_duplicate_is_isolated() {
    let mut store = store();
    let section = store.insert_from_palette(ElementKind::Section, None).unwrap();
    let text = store.insert_from_palette(ElementKind::Text, Some(&section)).unwrap();

    let copy = store.duplicate_element(&section).unwrap();
    let copied_text = store.tree().find(&copy).unwrap().children().unwrap()[0]
        .id()
        .to_string();
    assert_ne!(copied_text, text);

    store.update_element(&copied_text, &ElementPatch::content("changed"));
    assert_eq!(
        store.tree().find(&text).unwrap().content.as_deref(),
        ElementKind::Text.palette_content()
    );
}

#[test]
fn test_template_insertion() {
    let library = TemplateLibrary::builtin().unwrap();
    let mut store = store();
    store.insert_from_palette(ElementKind::Heading, None).unwrap();

    let hero = library.require("hero-1").unwrap();
    let first = store.insert_template(hero).unwrap();
    let second = store.insert_template(hero).unwrap();

    assert_eq!(first.len(), 1);
    assert_ne!(first, second);
    assert_eq!(store.tree().roots().len(), 3);
    store.tree().check_invariants().unwrap();

    // One undo step per template
    assert!(store.undo());
    assert_eq!(store.tree().roots().len(), 2);
    assert_eq!(store.history().redo_label(), Some("Insert template Hero Section - Modern"));
}

#[test]
fn test_cut_and_paste_moves_content() {
    let mut store = store();
    let section = store.insert_from_palette(ElementKind::Section, None).unwrap();
    let button = store.insert_from_palette(ElementKind::Button, Some(&section)).unwrap();
    store.update_element(&button, &ElementPatch::content("Sign up"));

    store.select(Some(&button));
    assert!(store.cut());
    assert!(!store.tree().contains(&button));

    let pasted = store.paste().unwrap();
    assert_ne!(pasted, button);
    let element = store.tree().find(&pasted).unwrap();
    assert_eq!(element.content.as_deref(), Some("Sign up"));
    assert_eq!(store.tree().parent_of(&pasted), None);
}

#[test]
fn test_locked_element_ignores_transform() {
    let mut store = store();
    let id = store.insert_from_palette(ElementKind::Image, None).unwrap();

    assert!(store.transform_element(&id, &Geometry::resized_to(10, 20, 300, 200)));
    assert_eq!(
        style_of(&store, &id).get(&StyleProperty::Width),
        Some(&StyleValue::from("300px"))
    );

    store.toggle_lock(&id);
    let before = store.tree().clone();
    assert!(!store.transform_element(&id, &Geometry::moved_to(0, 0)));
    assert_eq!(store.tree(), &before);
}

#[test]
fn test_reorder_root() {
    let mut store = store();
    let a = store.insert_from_palette(ElementKind::Text, None).unwrap();
    let b = store.insert_from_palette(ElementKind::Text, None).unwrap();

    assert!(store.reorder_root(&[b.clone(), a.clone()]).unwrap());
    assert_eq!(store.tree().root_ids(), vec![b.clone(), a.clone()]);

    assert!(!store.reorder_root(&[b.clone(), a.clone()]).unwrap());
    assert!(store.reorder_root(&[a.clone()]).is_err());
    assert!(store.reorder_root(&[a.clone(), a]).is_err());
    assert_eq!(store.history().undo_levels(), 3);
}

#[test]
fn test_history_limit_drops_oldest() {
    let config = EditorConfig {
        history_limit: 2,
        ..EditorConfig::default()
    };
    let mut store = DocumentStore::new(config);
    for _ in 0..4 {
        store.insert_from_palette(ElementKind::Text, None).unwrap();
    }

    assert!(store.undo());
    assert!(store.undo());
    assert!(!store.undo());
    assert_eq!(store.tree().roots().len(), 2);
}

#[test]
fn test_page_json_reload() {
    let mut store = store();
    let section = store.insert_from_palette(ElementKind::Section, None).unwrap();
    store.insert_from_palette(ElementKind::Input, Some(&section)).unwrap();
    store.toggle_lock(&section);

    let json = store.tree().to_json_pretty().unwrap();
    let reloaded = ElementTree::from_json(&json).unwrap();
    assert_eq!(&reloaded, store.tree());

    let mut resumed = DocumentStore::with_tree(reloaded, EditorConfig::with_session("integration"));
    let fresh = resumed.insert_from_palette(ElementKind::Text, None).unwrap();
    let ids: HashSet<&str> = resumed.tree().iter().map(Element::id).collect();
    assert_eq!(ids.len(), resumed.tree().len());
    assert!(ids.contains(fresh.as_str()));
}

#[test]
fn test_rejects_malformed_page_json() {
    let leaf_with_children = r#"[{ "id": "a", "type": "text", "children": [] }]"#;
    assert!(ElementTree::from_json(leaf_with_children).is_err());

    let duplicate_ids = r#"[{ "id": "a", "type": "text" }, { "id": "a", "type": "button" }]"#;
    assert!(ElementTree::from_json(duplicate_ids).is_err());

    let container_without_children = r#"[{ "id": "a", "type": "column" }]"#;
    let tree = ElementTree::from_json(container_without_children).unwrap();
    assert_eq!(tree.roots()[0].children(), Some(&[][..]));
}

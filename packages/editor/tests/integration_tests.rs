//! Integration tests for the editor crate
//!
//! Each test drives a document end-to-end through the public surface:
//! open through a store, query, modify, and check the written text.

use anyhow::Result;
use confix_editor::{
    EditOptions, EditorError, InsertionOrder, JsonDocument, MockFileSystem, Segment,
};
use confix_parser::parse;
use serde_json::json;
use std::path::Path;

const MANIFEST: &str = "package.json";

fn store_with(content: &str) -> MockFileSystem {
    let store = MockFileSystem::new();
    store.add_file(MANIFEST, content);
    store
}

fn written(store: &MockFileSystem) -> String {
    store.contents(Path::new(MANIFEST)).unwrap()
}

#[test]
fn test_roundtrip_same_value_keeps_logical_content() -> Result<()> {
    let source = "{\n  \"name\": \"app\",\n  \"port\": 8080\n}";
    let store = store_with(source);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    let value = doc.get(&[Segment::key("port")])?.unwrap().to_value();
    doc.modify(&[Segment::key("port")], Some(value))?;

    let root = parse(&written(&store)).unwrap();
    assert_eq!(
        root.find(&[Segment::key("port")]).unwrap().to_value(),
        json!(8080)
    );
    Ok(())
}

#[test]
fn test_untouched_comments_survive_modification() -> Result<()> {
    let source = "{\n  // keep this note\n  \"a\": 1,\n  \"b\": 2\n}";
    let store = store_with(source);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    doc.modify(&[Segment::key("b")], Some(json!(3)))?;

    let next = written(&store);
    assert!(next.contains("// keep this note"));
    let root = parse(&next).unwrap();
    assert_eq!(root.find(&[Segment::key("a")]).unwrap().to_value(), json!(1));
    assert_eq!(root.find(&[Segment::key("b")]).unwrap().to_value(), json!(3));
    Ok(())
}

#[test]
fn test_scripts_merge_not_replace() -> Result<()> {
    let store = store_with(r#"{"scripts":{"a":"x"}}"#);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    doc.modify(&[Segment::key("scripts")], Some(json!({ "b": "y" })))?;

    let root = parse(&written(&store)).unwrap();
    assert_eq!(
        root.find(&[Segment::key("scripts")]).unwrap().to_value(),
        json!({ "a": "x", "b": "y" })
    );
    Ok(())
}

#[test]
fn test_ordered_insertion_appends_by_default() -> Result<()> {
    let store = store_with(r#"{"a":1,"b":2}"#);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    doc.modify(&[Segment::key("c")], Some(json!(3)))?;

    let next = written(&store);
    // still valid JSON, no trailing comma, appended after existing keys
    let root = parse(&next).unwrap();
    assert_eq!(root.to_value(), json!({ "a": 1, "b": 2, "c": 3 }));
    let keys: Vec<_> = root
        .properties()
        .unwrap()
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(keys, ["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_preferred_order_places_known_keys() -> Result<()> {
    let store = store_with("{\n  \"name\": \"app\",\n  \"dependencies\": {}\n}");
    let options = EditOptions {
        order: InsertionOrder::Preferred(
            ["name", "version", "scripts", "dependencies"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        ..EditOptions::default()
    };
    let mut doc = JsonDocument::open_with(&store, MANIFEST, options)?;

    doc.modify(&[Segment::key("scripts")], Some(json!({ "test": "jest" })))?;

    let root = parse(&written(&store)).unwrap();
    let keys: Vec<_> = root
        .properties()
        .unwrap()
        .iter()
        .map(|p| p.key.as_str())
        .collect();
    assert_eq!(keys, ["name", "scripts", "dependencies"]);
    Ok(())
}

#[test]
fn test_deletion_then_remove_is_noop() -> Result<()> {
    let store = store_with(r#"{"a":1,"b":2}"#);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    doc.modify(&[Segment::key("a")], None)?;
    let root = parse(&written(&store)).unwrap();
    assert_eq!(root.to_value(), json!({ "b": 2 }));
    assert_eq!(store.write_count(), 1);

    // removing the same path again performs no store write
    doc.remove(&[Segment::key("a")])?;
    assert_eq!(store.write_count(), 1);
    Ok(())
}

#[test]
fn test_malformed_document_fails_with_offset() {
    let store = store_with("{ a: }");
    let mut doc = JsonDocument::open(&store, MANIFEST).unwrap();

    let err = doc.get(&[]).unwrap_err();
    match err {
        EditorError::Parse { source, .. } => {
            // the diagnostic points inside the bad token
            assert_eq!(source.offset(), 2);
            assert_eq!(source.code(), "InvalidSymbol");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_absent_file_fails_before_parse() {
    let store = MockFileSystem::new();
    let err = JsonDocument::open(&store, MANIFEST).unwrap_err();
    assert!(matches!(err, EditorError::NotFound(_)));
}

#[test]
fn test_sequential_edits_through_one_document() -> Result<()> {
    // one editor per file per transaction: several edits see each other
    let source = "{\n  // workspace config\n  \"targets\": {\n    \"build\": { \"cmd\": \"make\" }\n  }\n}";
    let store = store_with(source);
    let mut doc = JsonDocument::open(&store, MANIFEST)?;

    doc.modify(
        &[Segment::key("targets"), Segment::key("e2e")],
        Some(json!({ "cmd": "nightwatch", "retries": 2 })),
    )?;
    doc.modify(
        &[Segment::key("targets"), Segment::key("e2e"), Segment::key("retries")],
        Some(json!(3)),
    )?;
    doc.remove(&[Segment::key("targets"), Segment::key("build")])?;

    let next = written(&store);
    assert!(next.contains("// workspace config"));
    let root = parse(&next).unwrap();
    assert_eq!(
        root.find(&[Segment::key("targets")]).unwrap().to_value(),
        json!({ "e2e": { "cmd": "nightwatch", "retries": 3 } })
    );
    Ok(())
}

#[test]
fn test_store_failure_surfaces_unchanged() {
    let store = store_with("{}");
    let mut doc = JsonDocument::open(&store, MANIFEST).unwrap();
    store.set_read_only(true);

    let err = doc.modify(&[Segment::key("a")], Some(json!(1))).unwrap_err();
    match err {
        EditorError::Io(io) => {
            assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied)
        }
        other => panic!("expected io error, got {other:?}"),
    }
    // nothing was written
    assert_eq!(written(&store), "{}");
}

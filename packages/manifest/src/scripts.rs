//! Script table and top-level property editing

use std::path::Path;

use confix_editor::{
    DocumentStore, EditOptions, EditorError, InsertionOrder, JsonDocument, Segment,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Canonical top-level key order for npm manifests
pub const MANIFEST_KEY_ORDER: [&str; 10] = [
    "name",
    "version",
    "description",
    "keywords",
    "license",
    "scripts",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

fn ordered_options() -> EditOptions {
    EditOptions {
        order: InsertionOrder::Preferred(
            MANIFEST_KEY_ORDER.iter().map(|key| key.to_string()).collect(),
        ),
        ..EditOptions::default()
    }
}

/// Add or update entries under `"scripts"`
///
/// Existing entries not named in `scripts` are kept; named ones are
/// overwritten. A missing `"scripts"` table is created in canonical
/// position.
pub fn add_scripts(
    store: &dyn DocumentStore,
    manifest: &Path,
    scripts: &Map<String, Value>,
) -> Result<(), EditorError> {
    debug!("merging {} script entries", scripts.len());
    let mut doc = JsonDocument::open_with(store, manifest, ordered_options())?;
    doc.modify(&[Segment::key("scripts")], Some(Value::Object(scripts.clone())))
}

/// Set a top-level manifest property, placing new keys in canonical order
pub fn add_manifest_property(
    store: &dyn DocumentStore,
    manifest: &Path,
    key: &str,
    value: Value,
) -> Result<(), EditorError> {
    debug!("setting manifest property {key}");
    let mut doc = JsonDocument::open_with(store, manifest, ordered_options())?;
    doc.modify(&[Segment::key(key)], Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use confix_editor::MockFileSystem;
    use confix_parser::parse;
    use serde_json::json;

    const MANIFEST: &str = "package.json";

    fn store_with(content: &str) -> MockFileSystem {
        let store = MockFileSystem::new();
        store.add_file(MANIFEST, content);
        store
    }

    fn manifest_root(store: &MockFileSystem) -> confix_parser::Node {
        parse(&store.contents(Path::new(MANIFEST)).unwrap()).unwrap()
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_add_scripts_merges_with_existing() {
        let store = store_with(r#"{ "scripts": { "build": "tsc", "test": "jest" } }"#);

        let incoming = as_map(json!({ "test": "jest --coverage", "e2e": "nightwatch" }));
        add_scripts(&store, Path::new(MANIFEST), &incoming).unwrap();

        let root = manifest_root(&store);
        assert_eq!(
            root.find(&[Segment::key("scripts")]).unwrap().to_value(),
            json!({
                "build": "tsc",
                "test": "jest --coverage",
                "e2e": "nightwatch"
            })
        );
    }

    #[test]
    fn test_add_scripts_creates_table_in_canonical_position() {
        let store = store_with("{\n  \"name\": \"app\",\n  \"dependencies\": {}\n}");

        let incoming = as_map(json!({ "e2e": "nightwatch" }));
        add_scripts(&store, Path::new(MANIFEST), &incoming).unwrap();

        let root = manifest_root(&store);
        let keys: Vec<_> = root
            .properties()
            .unwrap()
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(keys, ["name", "scripts", "dependencies"]);
    }

    #[test]
    fn test_add_manifest_property_unknown_key_appends() {
        let store = store_with("{\n  \"name\": \"app\"\n}");

        add_manifest_property(&store, Path::new(MANIFEST), "private", json!(true)).unwrap();

        let root = manifest_root(&store);
        let keys: Vec<_> = root
            .properties()
            .unwrap()
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(keys, ["name", "private"]);
        assert_eq!(root.find(&[Segment::key("private")]).unwrap().as_bool(), Some(true));
    }
}

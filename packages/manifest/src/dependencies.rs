//! Dependency table editing
//!
//! Adds, reads and removes entries in the four npm dependency tables
//! without disturbing anything else in the manifest.

use std::path::Path;

use confix_editor::{DocumentStore, EditorError, JsonDocument, Segment};
use serde_json::Value;
use tracing::debug;

/// Which dependency table an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    Default,
    Dev,
    Peer,
    Optional,
}

impl DependencyType {
    pub const ALL: [DependencyType; 4] = [
        DependencyType::Default,
        DependencyType::Dev,
        DependencyType::Peer,
        DependencyType::Optional,
    ];

    /// Top-level manifest key of this table
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyType::Default => "dependencies",
            DependencyType::Dev => "devDependencies",
            DependencyType::Peer => "peerDependencies",
            DependencyType::Optional => "optionalDependencies",
        }
    }
}

/// One dependency entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub kind: DependencyType,
    pub name: String,
    pub version: String,
    /// Replace an existing entry's version instead of leaving it alone
    pub overwrite: bool,
}

/// Add a dependency entry; existing entries are kept unless `overwrite` is set
pub fn add_dependency(
    store: &dyn DocumentStore,
    manifest: &Path,
    dependency: &Dependency,
) -> Result<(), EditorError> {
    let mut doc = JsonDocument::open(store, manifest)?;
    let path = [
        Segment::key(dependency.kind.manifest_key()),
        Segment::key(&dependency.name),
    ];
    if dependency.overwrite || doc.get(&path)?.is_none() {
        debug!(
            "adding {}@{} to {}",
            dependency.name,
            dependency.version,
            dependency.kind.manifest_key()
        );
        doc.modify(&path, Some(Value::String(dependency.version.clone())))?;
    }
    Ok(())
}

/// Look a dependency up across all four tables
pub fn get_dependency(
    store: &dyn DocumentStore,
    manifest: &Path,
    name: &str,
) -> Result<Option<Dependency>, EditorError> {
    let mut doc = JsonDocument::open(store, manifest)?;
    for kind in DependencyType::ALL {
        let path = [Segment::key(kind.manifest_key()), Segment::key(name)];
        if let Some(node) = doc.get(&path)? {
            if let Some(version) = node.as_str() {
                return Ok(Some(Dependency {
                    kind,
                    name: name.to_string(),
                    version: version.to_string(),
                    overwrite: false,
                }));
            }
        }
    }
    Ok(None)
}

/// Remove a dependency entry; absent entries are a no-op
pub fn remove_dependency(
    store: &dyn DocumentStore,
    manifest: &Path,
    kind: DependencyType,
    name: &str,
) -> Result<(), EditorError> {
    debug!("removing {} from {}", name, kind.manifest_key());
    let mut doc = JsonDocument::open(store, manifest)?;
    doc.remove(&[Segment::key(kind.manifest_key()), Segment::key(name)])
}

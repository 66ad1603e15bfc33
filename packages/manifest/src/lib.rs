//! # Confix Manifest
//!
//! npm-style manifest mutators built on the editor's public surface.
//! Dependency tables and script entries are edited through path
//! expressions only; comments and unrelated keys in the manifest survive
//! every operation.

mod dependencies;
mod scripts;

pub use dependencies::{
    add_dependency, get_dependency, remove_dependency, Dependency, DependencyType,
};
pub use scripts::{add_manifest_property, add_scripts, MANIFEST_KEY_ORDER};

// Re-export the editor surface callers need alongside these helpers
pub use confix_editor::{DocumentStore, EditorError, JsonDocument, Segment};

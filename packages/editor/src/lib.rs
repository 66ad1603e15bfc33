//! # Confix Editor
//!
//! Comment-and-order-preserving edit engine for JSON(C) configuration files.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: JSONC text → lossless syntax tree   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: JsonDocument lifecycle + edits      │
//! │  - Open documents through a DocumentStore   │
//! │  - Resolve path expressions to tree nodes   │
//! │  - Translate modifications into text edits  │
//! │  - Apply edits, write back, drop the cache  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: read / write / exists                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Text is source of truth**: the tree is a derived view with byte spans
//! 2. **Minimal edits**: content outside the touched range survives untouched
//! 3. **All-or-nothing writes**: edits are computed in full before the single
//!    store write; a failed modification writes nothing
//! 4. **Invalidate on write**: the cached tree never outlives its text
//!
//! ## Usage
//!
//! ```rust,ignore
//! use confix_editor::{JsonDocument, RealFileSystem, Segment};
//!
//! let store = RealFileSystem;
//! let mut doc = JsonDocument::open(&store, "package.json")?;
//!
//! // read
//! let name = doc.get(&[Segment::key("name")])?;
//!
//! // write: comments and key order elsewhere in the file are preserved
//! doc.modify(
//!     &[Segment::key("scripts"), Segment::key("e2e")],
//!     Some(serde_json::json!("nightwatch --env chrome")),
//! )?;
//!
//! // delete
//! doc.remove(&[Segment::key("devDependencies"), Segment::key("protractor")])?;
//! ```

mod document;
mod edits;
mod errors;
mod insert;
mod options;

pub use document::JsonDocument;
pub use edits::{apply_edits, line_indent, TextEdit};
pub use errors::EditorError;
pub use insert::{insert_item, insert_property};
pub use options::{EditOptions, InsertionOrder, MergePolicy};

// Re-export common types for convenience
pub use confix_common::{DocumentStore, MockFileSystem, RealFileSystem};
pub use confix_parser::{FormattingOptions, Node, NodeKind, Segment};

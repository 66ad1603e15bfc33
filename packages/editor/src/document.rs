//! # Document Handle
//!
//! Core abstraction for editing one JSON(C) configuration file.
//!
//! A `JsonDocument` owns the raw text of a single document read through a
//! [`DocumentStore`], lazily parses it into a lossless syntax tree, and
//! translates modifications into minimal text edits so comments, key order
//! and formatting around the touched range survive.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Get → Modify → Write
//!   ↓     ↓      ↓        ↓
//! Store  Tree  Edits   Store (tree invalidated)
//! ```
//!
//! The cached tree is always a faithful parse of the current text: every
//! mutation path ends by committing the new text and dropping the cache in
//! the same step. One instance per physical file per logical transaction;
//! there is no locking across instances or processes.

use std::path::{Path, PathBuf};

use confix_common::DocumentStore;
use confix_parser::serializer::Serializer;
use confix_parser::{parse, Node, Property, Segment, Span};
use serde_json::Value;

use crate::edits::{apply_edits, line_indent, TextEdit};
use crate::errors::EditorError;
use crate::insert::{insert_item, insert_property};
use crate::options::EditOptions;

/// Editable JSON(C) configuration document
pub struct JsonDocument<'s> {
    store: &'s dyn DocumentStore,
    path: PathBuf,

    /// Current document text; replaced wholesale on each modification
    content: String,

    /// Cached parse of `content`; dropped on every mutation
    tree: Option<Node>,

    options: EditOptions,
}

impl<'s> std::fmt::Debug for JsonDocument<'s> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonDocument")
            .field("path", &self.path)
            .field("content", &self.content)
            .field("tree", &self.tree)
            .field("options", &self.options)
            .finish()
    }
}

impl<'s> JsonDocument<'s> {
    /// Open a document through the store
    ///
    /// Fails with [`EditorError::NotFound`] before any parse is attempted
    /// when the store reports the path absent. Parsing happens lazily on the
    /// first query.
    pub fn open(store: &'s dyn DocumentStore, path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        Self::open_with(store, path, EditOptions::default())
    }

    pub fn open_with(
        store: &'s dyn DocumentStore,
        path: impl Into<PathBuf>,
        options: EditOptions,
    ) -> Result<Self, EditorError> {
        let path = path.into();
        let content = store
            .read(&path)?
            .ok_or_else(|| EditorError::NotFound(path.clone()))?;
        Ok(Self {
            store,
            path,
            content,
            tree: None,
            options,
        })
    }

    /// Current document text
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Node at `path`, or `None` when any segment fails to resolve
    pub fn get(&mut self, path: &[Segment]) -> Result<Option<&Node>, EditorError> {
        Ok(self.parsed()?.find(path))
    }

    /// Write `value` at `path`, or delete the node there when `value` is `None`
    ///
    /// An existing node is replaced in place; a missing node is inserted
    /// through the ordered-insertion helper, creating missing intermediate
    /// objects along the way. When the merge policy matches the path and an
    /// object already exists there, the incoming object is shallow-merged on
    /// top of it instead of replacing it.
    ///
    /// Every call performs exactly one store write and invalidates the
    /// cached tree, even when the computed edit set is empty.
    pub fn modify(&mut self, path: &[Segment], value: Option<Value>) -> Result<(), EditorError> {
        let value = self.merged_value(path, value)?;

        // the cache is consumed by the mutation; it never survives a write
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => self.parse_content()?,
        };
        let edits = compute_edits(&self.content, &tree, path, value.as_ref(), &self.options)?;

        let next = apply_edits(&self.content, &edits);
        self.store.write(&self.path, &next)?;
        self.content = next;
        Ok(())
    }

    /// Delete the node at `path` if present; no store write otherwise
    pub fn remove(&mut self, path: &[Segment]) -> Result<(), EditorError> {
        if self.get(path)?.is_some() {
            self.modify(path, None)?;
        }
        Ok(())
    }

    fn parsed(&mut self) -> Result<&Node, EditorError> {
        if self.tree.is_none() {
            let tree = self.parse_content()?;
            self.tree = Some(tree);
        }
        Ok(self.tree.as_ref().unwrap())
    }

    fn parse_content(&self) -> Result<Node, EditorError> {
        parse(&self.content).map_err(|source| EditorError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Apply the merge policy: shallow-merge an incoming object on top of an
    /// existing object node when the policy matches the path
    fn merged_value(
        &mut self,
        path: &[Segment],
        value: Option<Value>,
    ) -> Result<Option<Value>, EditorError> {
        let Some(Value::Object(incoming)) = &value else {
            return Ok(value);
        };
        if !self.options.merge.applies(path) {
            return Ok(value);
        }
        let merged = match self.get(path)? {
            Some(node) => node.properties().map(|properties| {
                let mut map =
                    serde_json::Map::with_capacity(properties.len() + incoming.len());
                for property in properties {
                    map.insert(property.key.clone(), property.value.to_value());
                }
                for (key, entry) in incoming {
                    map.insert(key.clone(), entry.clone());
                }
                Value::Object(map)
            }),
            None => None,
        };
        Ok(merged.or(value))
    }
}

/// Parent container of a resolved node
enum ParentRef<'t> {
    Object {
        properties: &'t [Property],
        span: Span,
        index: usize,
    },
    Array {
        items: &'t [Node],
        span: Span,
        index: usize,
    },
}

/// Translate one modification into text edits against `source`
fn compute_edits(
    source: &str,
    root: &Node,
    path: &[Segment],
    value: Option<&Value>,
    options: &EditOptions,
) -> Result<Vec<TextEdit>, EditorError> {
    // walk the longest resolvable prefix, remembering the final parent
    let mut node = root;
    let mut parent: Option<ParentRef<'_>> = None;
    let mut resolved = 0;

    for segment in path {
        let step = match (node, segment) {
            (Node::Object { properties, span }, Segment::Key(key)) => {
                properties.iter().position(|p| &p.key == key).map(|index| {
                    (
                        ParentRef::Object {
                            properties,
                            span: *span,
                            index,
                        },
                        &properties[index].value,
                    )
                })
            }
            (Node::Array { items, span }, Segment::Index(index)) if *index < items.len() => {
                Some((
                    ParentRef::Array {
                        items,
                        span: *span,
                        index: *index,
                    },
                    &items[*index],
                ))
            }
            _ => None,
        };
        match step {
            Some((step_parent, child)) => {
                parent = Some(step_parent);
                node = child;
                resolved += 1;
            }
            None => break,
        }
    }

    if resolved == path.len() {
        return Ok(match value {
            Some(value) => vec![replace_edit(source, node.span(), value, options)],
            None => match parent {
                None => vec![TextEdit::replace(node.span(), "")],
                Some(ParentRef::Object {
                    properties,
                    span,
                    index,
                }) => vec![remove_property_edit(source, span, properties, index)],
                Some(ParentRef::Array { items, span, index }) => {
                    vec![remove_item_edit(source, span, items, index)]
                }
            },
        });
    }

    // the path does not fully resolve: deleting an absent node is a no-op,
    // writing one goes through the ordered-insertion helper
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let rest = &path[resolved..];
    match (node, &rest[0]) {
        (Node::Object { properties, span }, Segment::Key(key)) => {
            let wrapped = wrap_value(path, &rest[1..], value)?;
            let existing: Vec<&str> = properties.iter().map(|p| p.key.as_str()).collect();
            let index = options.order.resolve(&existing, key);
            Ok(vec![insert_property(
                source,
                *span,
                properties,
                key,
                &wrapped,
                index,
                &options.formatting,
            )])
        }
        (Node::Array { items, span }, Segment::Index(index))
            if *index == items.len() && rest.len() == 1 =>
        {
            Ok(vec![insert_item(
                source,
                *span,
                items,
                value,
                &options.formatting,
            )])
        }
        _ => Err(EditorError::InvalidTarget {
            path: display_path(path),
        }),
    }
}

fn replace_edit(source: &str, span: Span, value: &Value, options: &EditOptions) -> TextEdit {
    let base = line_indent(source, span.start);
    let text =
        Serializer::with_base_indent(options.formatting, base.to_string()).serialize(value);
    TextEdit::replace(span, text)
}

fn remove_property_edit(
    source: &str,
    object_span: Span,
    properties: &[Property],
    index: usize,
) -> TextEdit {
    let property = &properties[index];
    if properties.len() == 1 {
        // strip surrounding trivia only when it is pure whitespace; comments
        // next to the sole property stay in place
        let inner_start = object_span.start + 1;
        let inner_end = object_span.end - 1;
        let before = &source[inner_start..property.span.start];
        let after = &source[property.span.end..inner_end];
        if before.trim().is_empty() && after.trim().is_empty() {
            return TextEdit::delete(inner_start, inner_end);
        }
        return TextEdit::delete(property.span.start, property.span.end);
    }
    if index == properties.len() - 1 {
        // the separating comma lives between the previous entry and this one
        let previous = &properties[index - 1];
        TextEdit::delete(previous.span.end, property.span.end)
    } else {
        let next = &properties[index + 1];
        TextEdit::delete(property.span.start, next.span.start)
    }
}

fn remove_item_edit(source: &str, array_span: Span, items: &[Node], index: usize) -> TextEdit {
    let span = items[index].span();
    if items.len() == 1 {
        let inner_start = array_span.start + 1;
        let inner_end = array_span.end - 1;
        let before = &source[inner_start..span.start];
        let after = &source[span.end..inner_end];
        if before.trim().is_empty() && after.trim().is_empty() {
            return TextEdit::delete(inner_start, inner_end);
        }
        return TextEdit::delete(span.start, span.end);
    }
    if index == items.len() - 1 {
        TextEdit::delete(items[index - 1].span().end, span.end)
    } else {
        TextEdit::delete(span.start, items[index + 1].span().start)
    }
}

fn wrap_value(path: &[Segment], rest: &[Segment], value: &Value) -> Result<Value, EditorError> {
    let mut wrapped = value.clone();
    for segment in rest.iter().rev() {
        match segment {
            Segment::Key(key) => {
                let mut map = serde_json::Map::new();
                map.insert(key.clone(), wrapped);
                wrapped = Value::Object(map);
            }
            Segment::Index(_) => {
                return Err(EditorError::InvalidTarget {
                    path: display_path(path),
                });
            }
        }
    }
    Ok(wrapped)
}

fn display_path(path: &[Segment]) -> String {
    path.iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

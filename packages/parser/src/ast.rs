use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Byte range of a node in the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One segment of a path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object property name
    Key(String),
    /// Array element position
    Index(usize),
}

impl Segment {
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    pub fn index(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) => write!(f, "{name}"),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Node kinds a path query can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

/// A value in the syntax tree, with its source span
///
/// The tree is lossless with respect to positions: every node records the
/// byte range it was parsed from, so edits can be computed as minimal
/// patches against the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Object { properties: Vec<Property>, span: Span },
    Array { items: Vec<Node>, span: Span },
    String { value: String, span: Span },
    Number { value: serde_json::Number, span: Span },
    Boolean { value: bool, span: Span },
    Null { span: Span },
}

/// An object entry: key, value and the span covering both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub key_span: Span,
    pub value: Node,
    pub span: Span,
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Object { span, .. }
            | Node::Array { span, .. }
            | Node::String { span, .. }
            | Node::Number { span, .. }
            | Node::Boolean { span, .. }
            | Node::Null { span } => *span,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object { .. } => NodeKind::Object,
            Node::Array { .. } => NodeKind::Array,
            Node::String { .. } => NodeKind::String,
            Node::Number { .. } => NodeKind::Number,
            Node::Boolean { .. } => NodeKind::Boolean,
            Node::Null { .. } => NodeKind::Null,
        }
    }

    /// Resolve a path expression against this node
    ///
    /// Returns `None` as soon as any segment fails to resolve.
    pub fn find(&self, path: &[Segment]) -> Option<&Node> {
        let mut node = self;
        for segment in path {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Resolve a single path segment
    pub fn child(&self, segment: &Segment) -> Option<&Node> {
        match (self, segment) {
            (Node::Object { properties, .. }, Segment::Key(key)) => properties
                .iter()
                .find(|property| &property.key == key)
                .map(|property| &property.value),
            (Node::Array { items, .. }, Segment::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    pub fn properties(&self) -> Option<&[Property]> {
        match self {
            Node::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[Node]> {
        match self {
            Node::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties()?.iter().find(|property| property.key == key)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Lower this subtree to its logical value, dropping position data
    pub fn to_value(&self) -> Value {
        match self {
            Node::Object { properties, .. } => {
                let mut map = serde_json::Map::with_capacity(properties.len());
                for property in properties {
                    map.insert(property.key.clone(), property.value.to_value());
                }
                Value::Object(map)
            }
            Node::Array { items, .. } => {
                Value::Array(items.iter().map(Node::to_value).collect())
            }
            Node::String { value, .. } => Value::String(value.clone()),
            Node::Number { value, .. } => Value::Number(value.clone()),
            Node::Boolean { value, .. } => Value::Bool(*value),
            Node::Null { .. } => Value::Null,
        }
    }
}

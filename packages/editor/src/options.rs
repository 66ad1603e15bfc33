//! Editing policies
//!
//! The editor itself knows nothing about well-known keys; merge behavior and
//! preferred key placement are supplied here by the caller.

use confix_parser::{FormattingOptions, Segment};

/// Per-document editing configuration
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub formatting: FormattingOptions,
    pub merge: MergePolicy,
    pub order: InsertionOrder,
}

/// How `modify` treats an object value written over an existing object
#[derive(Debug, Clone)]
pub enum MergePolicy {
    /// Always replace the existing value wholesale
    Replace,
    /// Shallow-merge when the final path segment matches one of these keys:
    /// existing entries are retained unless the incoming object overwrites them
    MergeKeys(Vec<String>),
}

impl Default for MergePolicy {
    fn default() -> Self {
        // manifest script tables accumulate entries rather than being replaced
        Self::MergeKeys(vec!["scripts".to_string()])
    }
}

impl MergePolicy {
    pub fn applies(&self, path: &[Segment]) -> bool {
        match self {
            MergePolicy::Replace => false,
            MergePolicy::MergeKeys(keys) => {
                matches!(path.last(), Some(Segment::Key(key)) if keys.iter().any(|k| k == key))
            }
        }
    }
}

/// Where a newly inserted property lands among existing ones
#[derive(Debug, Clone, Default)]
pub enum InsertionOrder {
    /// Append after the last existing property
    #[default]
    End,
    /// Canonical key order table. Keys in the table are inserted before the
    /// first existing key ranked after them; unknown keys rank last. The
    /// index counts existing keys ranked at or before the new key.
    Preferred(Vec<String>),
}

impl InsertionOrder {
    /// Resolve the property index a new key should be inserted at
    pub fn resolve(&self, existing: &[&str], key: &str) -> usize {
        match self {
            InsertionOrder::End => existing.len(),
            InsertionOrder::Preferred(table) => {
                let Some(rank) = table.iter().position(|k| k == key) else {
                    return existing.len();
                };
                existing
                    .iter()
                    .filter(|name| {
                        table
                            .iter()
                            .position(|k| k == *name)
                            .is_some_and(|r| r <= rank)
                    })
                    .count()
            }
        }
    }
}

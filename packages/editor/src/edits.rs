//! Text edit records
//!
//! Edits are computed against one revision of the document text and applied
//! highest-offset first, so the offsets of pending edits stay valid while
//! earlier ones are spliced in.

use confix_parser::Span;

/// A single replace/insert/delete against the current document text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub offset: usize,
    pub length: usize,
    pub text: String,
}

impl TextEdit {
    pub fn new(offset: usize, length: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            length,
            text: text.into(),
        }
    }

    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset, 0, text)
    }

    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self::new(span.start, span.len(), text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end - start, "")
    }
}

/// Apply a set of non-overlapping edits, producing the next document text
pub fn apply_edits(content: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.offset.cmp(&a.offset));

    let mut next = content.to_string();
    for edit in ordered {
        next.replace_range(edit.offset..edit.offset + edit.length, &edit.text);
    }
    next
}

/// Leading whitespace of the line containing `offset`, up to `offset`
pub fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &source[line_start..offset];
    let indent_len = line
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(line.len());
    &line[..indent_len]
}

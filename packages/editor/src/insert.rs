//! Ordered insertion
//!
//! Synthesizes the text for inserting a new entry into an existing object or
//! array without reformatting anything around it. Pure functions from the
//! current text plus tree positions to a single edit.

use confix_parser::serializer::{quote, Serializer};
use confix_parser::{FormattingOptions, Node, Property, Span};
use serde_json::Value;

use crate::edits::{line_indent, TextEdit};

/// Computes the edit that inserts `"key": value` into an object
///
/// `index` is the property position the new entry should occupy; any index
/// at or past the current property count appends after the last property.
/// Indentation is taken from the entry the new one lands next to, so an
/// object nested inside an array element indents like its own properties,
/// not like the full path depth.
pub fn insert_property(
    source: &str,
    object_span: Span,
    properties: &[Property],
    key: &str,
    value: &Value,
    index: usize,
    options: &FormattingOptions,
) -> TextEdit {
    let entry_key = quote(key);
    let object_text = &source[object_span.start..object_span.end];
    let multiline = object_text.contains('\n');
    let base = line_indent(source, object_span.start);

    if properties.is_empty() {
        let offset = object_span.start + 1;
        let text = if multiline {
            let inner = format!("{}{}", base, options.unit());
            let value_text =
                Serializer::with_base_indent(*options, inner.clone()).serialize(value);
            format!("\n{inner}{entry_key}: {value_text}")
        } else {
            let value_text =
                Serializer::with_base_indent(*options, base.to_string()).serialize(value);
            if object_text == "{}" {
                format!(" {entry_key}: {value_text} ")
            } else {
                format!(" {entry_key}: {value_text}")
            }
        };
        return TextEdit::insert(offset, text);
    }

    if index >= properties.len() {
        let last = &properties[properties.len() - 1];
        let text = if multiline {
            let indent = line_indent(source, last.span.start);
            let value_text =
                Serializer::with_base_indent(*options, indent.to_string()).serialize(value);
            format!(",\n{indent}{entry_key}: {value_text}")
        } else {
            let value_text =
                Serializer::with_base_indent(*options, base.to_string()).serialize(value);
            format!(", {entry_key}: {value_text}")
        };
        return TextEdit::insert(last.span.end, text);
    }

    // Insert before an existing property, re-creating its indentation after
    // the new entry's separating comma.
    let target = &properties[index];
    let indent = line_indent(source, target.span.start);
    let text = if multiline {
        let value_text =
            Serializer::with_base_indent(*options, indent.to_string()).serialize(value);
        format!("{entry_key}: {value_text},\n{indent}")
    } else {
        let value_text =
            Serializer::with_base_indent(*options, base.to_string()).serialize(value);
        format!("{entry_key}: {value_text}, ")
    };
    TextEdit::insert(target.span.start, text)
}

/// Computes the edit that appends `value` to an array
pub fn insert_item(
    source: &str,
    array_span: Span,
    items: &[Node],
    value: &Value,
    options: &FormattingOptions,
) -> TextEdit {
    let array_text = &source[array_span.start..array_span.end];
    let multiline = array_text.contains('\n');
    let base = line_indent(source, array_span.start);

    if items.is_empty() {
        let text = if multiline {
            let inner = format!("{}{}", base, options.unit());
            let value_text =
                Serializer::with_base_indent(*options, inner.clone()).serialize(value);
            format!("\n{inner}{value_text}")
        } else {
            Serializer::with_base_indent(*options, base.to_string()).serialize(value)
        };
        return TextEdit::insert(array_span.start + 1, text);
    }

    let last_span = items[items.len() - 1].span();
    let text = if multiline {
        let indent = line_indent(source, last_span.start);
        let value_text =
            Serializer::with_base_indent(*options, indent.to_string()).serialize(value);
        format!(",\n{indent}{value_text}")
    } else {
        let value_text =
            Serializer::with_base_indent(*options, base.to_string()).serialize(value);
        format!(", {value_text}")
    };
    TextEdit::insert(last_span.end, text)
}

use serde_json::Value;

/// Indentation style for emitted JSON
///
/// Mirrors the conventions of the config files being edited: two-space
/// indentation by default, tabs when `insert_spaces` is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingOptions {
    pub insert_spaces: bool,
    pub tab_size: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            insert_spaces: true,
            tab_size: 2,
        }
    }
}

impl FormattingOptions {
    /// One level of indentation
    pub fn unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }
}

/// Serializer converts logical values to canonical JSON text
///
/// Canonical form: keys double-quoted, `": "` separators, configured
/// indentation for nested containers, no trailing commas. A base
/// indentation prefix supports embedding the output mid-document: every
/// line after the first is prefixed with it, so a value serialized for
/// insertion indents relative to its insertion line only.
pub struct Serializer {
    options: FormattingOptions,
    base_indent: String,
}

impl Serializer {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            base_indent: String::new(),
        }
    }

    pub fn with_base_indent(options: FormattingOptions, base_indent: impl Into<String>) -> Self {
        Self {
            options,
            base_indent: base_indent.into(),
        }
    }

    pub fn serialize(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(value, 0, &mut out);
        out
    }

    fn write_value(&self, value: &Value, depth: usize, out: &mut String) {
        match value {
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => {
                out.push('{');
                for (i, (key, entry)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('\n');
                    self.write_indent(depth + 1, out);
                    out.push_str(&quote(key));
                    out.push_str(": ");
                    self.write_value(entry, depth + 1, out);
                }
                out.push('\n');
                self.write_indent(depth, out);
                out.push('}');
            }
            Value::Array(items) if items.is_empty() => out.push_str("[]"),
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('\n');
                    self.write_indent(depth + 1, out);
                    self.write_value(item, depth + 1, out);
                }
                out.push('\n');
                self.write_indent(depth, out);
                out.push(']');
            }
            Value::String(s) => out.push_str(&quote(s)),
            Value::Number(n) => out.push_str(&n.to_string()),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Null => out.push_str("null"),
        }
    }

    fn write_indent(&self, depth: usize, out: &mut String) {
        out.push_str(&self.base_indent);
        let unit = self.options.unit();
        for _ in 0..depth {
            out.push_str(&unit);
        }
    }
}

/// Serialize a value as canonical JSON with the given indentation
pub fn serialize(value: &Value, options: &FormattingOptions) -> String {
    Serializer::new(*options).serialize(value)
}

/// Quote and escape a string per JSON rules
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_scalars() {
        let options = FormattingOptions::default();
        assert_eq!(serialize(&json!(true), &options), "true");
        assert_eq!(serialize(&json!(null), &options), "null");
        assert_eq!(serialize(&json!(1), &options), "1");
        assert_eq!(serialize(&json!("a\"b"), &options), r#""a\"b""#);
    }

    #[test]
    fn test_serialize_object_indentation() {
        let value = json!({ "a": 1, "b": { "c": [1, 2] } });
        let expected = "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": [\n      1,\n      2\n    ]\n  }\n}";
        assert_eq!(serialize(&value, &FormattingOptions::default()), expected);
    }

    #[test]
    fn test_serialize_empty_containers() {
        let options = FormattingOptions::default();
        assert_eq!(serialize(&json!({}), &options), "{}");
        assert_eq!(serialize(&json!([]), &options), "[]");
    }

    #[test]
    fn test_serialize_with_base_indent() {
        let serializer =
            Serializer::with_base_indent(FormattingOptions::default(), "    ");
        let out = serializer.serialize(&json!({ "x": 1 }));
        // first line unprefixed; following lines carry the base indent
        assert_eq!(out, "{\n      \"x\": 1\n    }");
    }

    #[test]
    fn test_serialize_tabs() {
        let options = FormattingOptions {
            insert_spaces: false,
            tab_size: 4,
        };
        assert_eq!(
            serialize(&json!({ "a": 1 }), &options),
            "{\n\t\"a\": 1\n}"
        );
    }

    #[test]
    fn test_quote_control_characters() {
        assert_eq!(quote("a\u{0001}b"), "\"a\\u0001b\"");
    }
}

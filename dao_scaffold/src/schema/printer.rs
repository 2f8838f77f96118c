//! Schema literal printer
//!
//! Emits a `Literal` with four-space indentation in the same shape a
//! `JSON.stringify(value, null, 4)` call would produce, except that keys
//! which are plain identifiers stay unquoted and type tokens stay bare.

use crate::schema::literal::Literal;

const INDENT: &str = "    ";

/// Render a literal as pretty-printed source text
pub fn print_literal(literal: &Literal) -> String {
    let mut out = String::new();
    write_value(&mut out, literal, 0);
    out
}

/// Render `value` as a double-quoted string literal
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_value(out: &mut String, literal: &Literal, depth: usize) {
    match literal {
        Literal::Null => out.push_str("null"),
        Literal::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Literal::Number(text) => out.push_str(text),
        Literal::String(s) => out.push_str(&quote_string(s)),
        Literal::Type(field_type) => out.push_str(field_type.as_str()),
        Literal::Now => out.push_str("Date.now"),
        Literal::Array(items) if items.is_empty() => out.push_str("[]"),
        Literal::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                write_indent(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            out.push('\n');
            write_indent(out, depth);
            out.push(']');
        }
        Literal::Object(entries) if entries.is_empty() => out.push_str("{}"),
        Literal::Object(entries) => {
            out.push_str("{\n");
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                write_indent(out, depth + 1);
                if is_identifier(key) {
                    out.push_str(key);
                } else {
                    out.push_str(&quote_string(key));
                }
                out.push_str(": ");
                write_value(out, value, depth + 1);
            }
            out.push('\n');
            write_indent(out, depth);
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parser::parse_literal;
    use crate::schema::types::FieldType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_layout() {
        let literal = Literal::object([
            ("table", Literal::String("users".into())),
            (
                "property",
                Literal::object([
                    ("name", Literal::Type(FieldType::String)),
                    (
                        "bornAt",
                        Literal::object([
                            ("type", Literal::Type(FieldType::Date)),
                            ("default", Literal::Now),
                        ]),
                    ),
                    ("tags", Literal::Array(vec![Literal::Number("1".into())])),
                    ("first-name", Literal::Object(Default::default())),
                ]),
            ),
        ]);
        let expected = r#"{
    table: "users",
    property: {
        name: String,
        bornAt: {
            type: Date,
            default: Date.now
        },
        tags: [
            1
        ],
        "first-name": {}
    }
}"#;
        assert_eq!(print_literal(&literal), expected);
        assert_eq!(parse_literal(expected).unwrap(), literal);
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string(r#"He said "hi""#), r#""He said \"hi\"""#);
        assert_eq!(quote_string("a\\b"), r#""a\\b""#);
        assert_eq!(quote_string("line\nnext\u{1}"), r#""line\nnext\u0001""#);
    }

    #[test]
    fn test_escaped_strings_parse_back() {
        for s in ["", "plain", "q\"uote", "back\\slash", "tab\tnew\nline", "\u{7f}ctl"] {
            let printed = print_literal(&Literal::String(s.to_string()));
            assert_eq!(parse_literal(&printed).unwrap(), Literal::String(s.to_string()));
        }
    }
}

//! Value tree of a schema literal
//!
//! A schema literal is a JSON superset: keys may be unquoted, and five bare
//! tokens (`String`, `Number`, `Date`, `Boolean`, `Date.now`) are values.

use indexmap::IndexMap;

use crate::schema::types::FieldType;

/// A parsed schema literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    /// Numbers keep their source text so they print back unchanged
    Number(String),
    String(String),
    /// One of the four bare type tokens
    Type(FieldType),
    /// The `Date.now` sentinel
    Now,
    Array(Vec<Literal>),
    Object(IndexMap<String, Literal>),
}

impl Literal {
    /// Short description used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Bool(_) => "boolean",
            Literal::Number(_) => "number",
            Literal::String(_) => "string",
            Literal::Type(_) => "type token",
            Literal::Now => "Date.now",
            Literal::Array(_) => "array",
            Literal::Object(_) => "object",
        }
    }

    /// Build an object literal from key/value pairs
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Literal)>,
        K: Into<String>,
    {
        Literal::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether `text` is a valid JavaScript-style number literal
    pub fn is_number_text(text: &str) -> bool {
        NUMBER_RE.is_match(text)
    }
}

static NUMBER_RE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("number regex is valid")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text() {
        for ok in ["0", "-1", "3.14", "1e3", "-2.5E-4", ".5", "10."] {
            assert!(Literal::is_number_text(ok), "{ok}");
        }
        for bad in ["", "-", "1e", "abc", "1.2.3", "0x10", " 1"] {
            assert!(!Literal::is_number_text(bad), "{bad}");
        }
    }
}

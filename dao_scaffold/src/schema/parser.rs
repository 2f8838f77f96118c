//! Schema literal parser
//!
//! A small recursive-descent parser for the restricted literal grammar:
//! objects, arrays, strings, numbers, `true`/`false`/`null`, the four type
//! tokens and the `Date.now` sentinel. Any other identifier in value
//! position is rejected, so nothing in the input is ever evaluated.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::schema::literal::Literal;
use crate::schema::types::FieldType;

/// Parse a complete schema literal.
///
/// Surrounding whitespace, comments and a single trailing `;` are allowed.
pub fn parse_literal(text: &str) -> Result<Literal> {
    let mut parser = Parser::new(text);
    let value = parser.parse_statement()?;
    match parser.peek() {
        None => Ok(value),
        Some(c) => Err(parser.error(format!("Unexpected trailing input starting with '{}'", c))),
    }
}

/// Parse one schema literal at the start of `text` and return it along with
/// the text that follows it.
///
/// Whitespace, comments and a single `;` after the literal are consumed.
pub fn parse_literal_prefix(text: &str) -> Result<(Literal, &str)> {
    let mut parser = Parser::new(text);
    let value = parser.parse_statement()?;
    let offset = text
        .char_indices()
        .nth(parser.pos)
        .map_or(text.len(), |(i, _)| i);
    Ok((value, &text[offset..]))
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::ParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("Expected '{}' but found '{}'", expected, c))),
            None => Err(self.error(format!("Expected '{}' but reached end of input", expected))),
        }
    }

    /// A value followed by optional trivia and a single `;`
    fn parse_statement(&mut self) -> Result<Literal> {
        self.skip_trivia()?;
        let value = self.parse_value()?;
        self.skip_trivia()?;
        if self.eat(';') {
            self.skip_trivia()?;
        }
        Ok(value)
    }

    /// Skip whitespace plus `//` and `/* */` comments
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let err = self.error("Unterminated block comment");
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_at(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => return Err(err),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Literal> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(q @ ('"' | '\'')) => self.parse_string(q).map(Literal::String),
            Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_ident_start(c) => self.parse_word(),
            Some(c) => Err(self.error(format!("Unexpected character '{}'", c))),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Literal> {
        self.expect('{')?;
        let mut entries = IndexMap::new();
        loop {
            self.skip_trivia()?;
            if self.eat('}') {
                return Ok(Literal::Object(entries));
            }
            let (line, column) = (self.line, self.column);
            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(Error::ParseError {
                    line,
                    column,
                    message: format!("Duplicate key '{}'", key),
                });
            }
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                return Ok(Literal::Object(entries));
            }
            return Err(match self.peek() {
                Some(c) => self.error(format!("Expected ',' or '}}' but found '{}'", c)),
                None => self.error("Unterminated object"),
            });
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.parse_string(q),
            Some(c) if is_ident_start(c) => Ok(self.take_identifier()),
            Some(c) => Err(self.error(format!("Expected a key but found '{}'", c))),
            None => Err(self.error("Unterminated object")),
        }
    }

    fn parse_array(&mut self) -> Result<Literal> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                return Ok(Literal::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(Literal::Array(items));
            }
            return Err(match self.peek() {
                Some(c) => self.error(format!("Expected ',' or ']' but found '{}'", c)),
                None => self.error("Unterminated array"),
            });
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        let start = self.error("Unterminated string");
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(start),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escaped = self
            .bump()
            .ok_or_else(|| self.error("Unterminated escape sequence"))?;
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // line continuation
            '\n' => {}
            'u' => {
                let high = self.parse_hex4()?;
                let code = if (0xD800..0xDC00).contains(&high)
                    && self.peek() == Some('\\')
                    && self.peek_at(1) == Some('u')
                {
                    self.bump();
                    self.bump();
                    let low = self.parse_hex4()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("Invalid surrogate pair"));
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                let c = char::from_u32(code)
                    .ok_or_else(|| self.error(format!("Invalid unicode escape {:04x}", code)))?;
                out.push(c);
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("Expected four hex digits in unicode escape"))?;
            self.bump();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Literal> {
        let err = self.error("Malformed number");
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let sign_in_exponent =
                (c == '+' || c == '-') && matches!(text.chars().last(), Some('e' | 'E'));
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || sign_in_exponent
                || (c == '-' && text.is_empty())
            {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if self.peek().map_or(false, is_ident_continue) || !Literal::is_number_text(&text) {
            return Err(err);
        }
        Ok(Literal::Number(text))
    }

    fn take_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_continue(c) {
                break;
            }
            ident.push(c);
            self.bump();
        }
        ident
    }

    /// Keywords, type tokens and the sentinel; everything else is disallowed
    fn parse_word(&mut self) -> Result<Literal> {
        let (line, column) = (self.line, self.column);
        let word = self.take_identifier();
        let literal = match word.as_str() {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            "null" => Literal::Null,
            "Date" if self.peek() == Some('.') => {
                self.bump();
                let member = self.take_identifier();
                if member != "now" {
                    return Err(Error::ParseError {
                        line,
                        column,
                        message: format!("Disallowed token 'Date.{}'", member),
                    });
                }
                Literal::Now
            }
            other => match FieldType::from_name(other) {
                Some(field_type) => Literal::Type(field_type),
                None => {
                    return Err(Error::ParseError {
                        line,
                        column,
                        message: format!("Disallowed token '{}'", other),
                    })
                }
            },
        };
        if self.peek() == Some('.') || self.peek() == Some('(') {
            return Err(self.error(format!("Disallowed expression after '{}'", word)));
        }
        Ok(literal)
    }
}

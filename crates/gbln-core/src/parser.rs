//! Recursive-descent GBLN parser.
//!
//! After a key (and an optional type hint), the single next token decides the
//! production:
//!
//! - `(`: a single value; the type hint is mandatory
//! - `{`: an object; a type hint is accepted and ignored
//! - `[`: an array; with a type hint every item is validated against it
//!   (homogeneous array), without one every item carries its own type
//!   (`<i32>(1)`), is an object (`{...}`) or a nested array
//!
//! No production ever backtracks. The first error aborts the parse and is
//! returned with its position and the path of the field being parsed.

use std::fmt;

use crate::comment::strip_comments;
use crate::error::{ErrorKind, GblnError, Result};
use crate::lexer::{Lexer, Position, Spanned, Token};
use crate::options::ParseOptions;
use crate::types::TypeTag;
use crate::validator::validate_value;
use crate::value::{Map, Value};

/// Parse a GBLN document with default options.
///
/// The result is always an [`Value::Object`] holding the document's
/// top-level records in source order.
///
/// ```
/// use gbln_core::{parse, Value};
/// let doc = parse("user{id<u32>(7) name<s16>(Alice)}").unwrap();
/// assert_eq!(doc.get_path("user.id"), Some(&Value::U32(7)));
/// assert_eq!(doc.get_path("user.name").and_then(Value::as_str), Some("Alice"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a GBLN document with explicit [`ParseOptions`].
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    tracing::debug!(bytes = input.len(), "parsing GBLN document");
    let source = strip_comments(input);
    let result = Parser::new(&source, options).document();
    match &result {
        Ok(value) => tracing::debug!(
            records = value.as_object().map_or(0, Map::len),
            "parsed GBLN document"
        ),
        Err(err) => tracing::debug!(
            kind = %err.kind(),
            line = err.line(),
            column = err.column(),
            "GBLN parse failed"
        ),
    }
    result
}

/// Check that `input` is a valid GBLN document, discarding the tree.
pub fn validate(input: &str) -> Result<()> {
    validate_with_options(input, &ParseOptions::default())
}

pub fn validate_with_options(input: &str, options: &ParseOptions) -> Result<()> {
    parse_with_options(input, options).map(drop)
}

/// One step of the field path reported in error messages.
enum Segment {
    Key(String),
    Index(usize),
}

struct FieldPath<'p>(&'p [Segment]);

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// An object under construction, remembering the line each key was defined on.
#[derive(Default)]
struct Members {
    map: Map,
    lines: Vec<usize>,
}

impl Members {
    fn first_line(&self, key: &str) -> Option<usize> {
        let index = self.map.get_index_of(key)?;
        self.lines.get(index).copied()
    }

    fn insert(&mut self, key: String, line: usize, value: Value) {
        self.map.insert(key, value);
        self.lines.push(line);
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: usize,
    path: Vec<Segment>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            max_depth: options.max_depth,
            path: Vec::new(),
        }
    }

    /// `document = record*`, collected into the root object.
    fn document(mut self) -> Result<Value> {
        let mut members = Members::default();
        loop {
            let tok = self.next()?;
            match tok.token {
                Token::Eof => return Ok(Value::Object(members.map)),
                Token::Identifier(key) => self.member(&mut members, key, tok.pos, 0)?,
                other => {
                    return Err(self.unexpected(&other, tok.pos, "expected a key at the top level"));
                }
            }
        }
    }

    /// Parse the record introduced by `key` and add it to `members`.
    fn member(
        &mut self,
        members: &mut Members,
        key: String,
        key_pos: Position,
        depth: usize,
    ) -> Result<()> {
        if let Some(first_line) = members.first_line(&key) {
            return Err(self
                .error(
                    ErrorKind::DuplicateKey,
                    key_pos,
                    format!(
                        "duplicate key '{key}' (first defined at line {first_line}, repeated at line {})",
                        key_pos.line
                    ),
                )
                .with_suggestion(format!("rename or remove one of the '{key}' entries")));
        }

        self.path.push(Segment::Key(key.clone()));
        let value = self.record(key_pos, depth)?;
        self.path.pop();
        members.insert(key, key_pos.line, value);
        Ok(())
    }

    /// Dispatch on the token after the key and optional type hint.
    fn record(&mut self, key_pos: Position, depth: usize) -> Result<Value> {
        let mut tok = self.next()?;
        let mut hint = None;
        if let Token::TypeHint(tag) = tok.token {
            hint = Some(tag);
            tok = self.next()?;
        }

        match (tok.token, hint) {
            (Token::LParen, Some(tag)) => self.single_value(tag, tok.pos),
            (Token::LParen, None) => Err(self
                .error(ErrorKind::TypeMismatch, key_pos, "single value has no type hint")
                .with_suggestion("declare the type before the value, e.g. age<i8>(25)")),
            (Token::LBrace, _) => self.object(tok.pos, depth + 1),
            (Token::LBracket, Some(tag)) => self.typed_array(tag, tok.pos, depth + 1),
            (Token::LBracket, None) => self.untyped_array(tok.pos, depth + 1),
            (Token::Eof, _) => Err(self.error(
                ErrorKind::UnexpectedEof,
                tok.pos,
                "input ended after a key, expected '(', '{' or '['",
            )),
            (other, _) => Err(self.unexpected(&other, tok.pos, "expected '(', '{' or '[' after the key")),
        }
    }

    /// `(` has been consumed; scan to the matching `)` and validate.
    fn single_value(&mut self, tag: TypeTag, open: Position) -> Result<Value> {
        let raw = self
            .lexer
            .scan_value(open)
            .map_err(|err| self.with_path(err))?;
        validate_value(&raw.text, tag).map_err(|invalid| self.with_path(invalid.at(raw.pos)))
    }

    fn object(&mut self, open: Position, depth: usize) -> Result<Value> {
        self.enter(depth, open, "object")?;
        let mut members = Members::default();
        loop {
            let tok = self.next()?;
            match tok.token {
                Token::RBrace => return Ok(Value::Object(members.map)),
                Token::Identifier(key) => self.member(&mut members, key, tok.pos, depth)?,
                Token::Eof => {
                    return Err(self.error(
                        ErrorKind::UnexpectedEof,
                        tok.pos,
                        format!(
                            "input ended before the '}}' closing the object opened at line {}, column {}",
                            open.line, open.column
                        ),
                    ));
                }
                other => return Err(self.unexpected(&other, tok.pos, "expected a key or '}'")),
            }
        }
    }

    /// `<tag>[` has been consumed. Items are bare tokens or `(...)` values,
    /// each validated against `tag`.
    fn typed_array(&mut self, tag: TypeTag, open: Position, depth: usize) -> Result<Value> {
        self.enter(depth, open, "typed array")?;
        let mut items = Vec::new();
        loop {
            self.lexer.skip_whitespace();
            let raw = match self.lexer.peek_char() {
                None => return Err(self.unclosed_array(open)),
                Some(']') => {
                    self.lexer.bump();
                    return Ok(Value::Array(items));
                }
                Some('(') => {
                    let paren = self.lexer.position();
                    self.lexer.bump();
                    self.path.push(Segment::Index(items.len()));
                    self.lexer
                        .scan_value(paren)
                        .map_err(|err| self.with_path(err))?
                }
                Some(_) => {
                    self.path.push(Segment::Index(items.len()));
                    self.lexer.scan_bare_item()
                }
            };
            let value = validate_value(&raw.text, tag)
                .map_err(|invalid| self.with_path(invalid.at(raw.pos)))?;
            self.path.pop();
            items.push(value);
        }
    }

    /// `[` without a type hint has been consumed. Every item is typed on its own.
    fn untyped_array(&mut self, open: Position, depth: usize) -> Result<Value> {
        self.enter(depth, open, "array")?;
        let mut items = Vec::new();
        loop {
            let tok = self.next()?;
            if tok.token == Token::RBracket {
                return Ok(Value::Array(items));
            }

            self.path.push(Segment::Index(items.len()));
            let item = match tok.token {
                Token::TypeHint(tag) => self.typed_item(tag, depth)?,
                Token::LBrace => self.object(tok.pos, depth + 1)?,
                Token::LBracket => self.untyped_array(tok.pos, depth + 1)?,
                Token::LParen => {
                    return Err(self
                        .error(ErrorKind::TypeMismatch, tok.pos, "array item has no type hint")
                        .with_suggestion(
                            "give each item a type, e.g. <i32>(1), or type the whole array, e.g. ids<i32>[1 2 3]",
                        ));
                }
                Token::Identifier(name) => {
                    return Err(self
                        .error(
                            ErrorKind::UnexpectedToken,
                            tok.pos,
                            format!("array items have no keys, found identifier '{name}'"),
                        )
                        .with_suggestion(format!(
                            "wrap keyed fields in an object item, e.g. {{{name}<i32>(1)}}"
                        )));
                }
                Token::Eof => return Err(self.unclosed_array(open)),
                other => return Err(self.unexpected(&other, tok.pos, "expected an array item or ']'")),
            };
            self.path.pop();
            items.push(item);
        }
    }

    /// An untyped array item that started with a type hint: `<tag>(value)` or
    /// a nested homogeneous array `<tag>[...]`.
    fn typed_item(&mut self, tag: TypeTag, depth: usize) -> Result<Value> {
        let tok = self.next()?;
        match tok.token {
            Token::LParen => self.single_value(tag, tok.pos),
            Token::LBracket => self.typed_array(tag, tok.pos, depth + 1),
            Token::Eof => Err(self.error(
                ErrorKind::UnexpectedEof,
                tok.pos,
                format!("input ended after type hint '<{tag}>'"),
            )),
            other => Err(self.unexpected(&other, tok.pos, "expected '(' or '[' after the type hint")),
        }
    }

    fn enter(&self, depth: usize, open: Position, what: &str) -> Result<()> {
        tracing::trace!(depth, path = %FieldPath(&self.path), "entering {what}");
        if depth > self.max_depth {
            return Err(self
                .error(
                    ErrorKind::MaxDepthExceeded,
                    open,
                    format!("{what} at depth {depth} exceeds the limit of {}", self.max_depth),
                )
                .with_suggestion("flatten the document or raise ParseOptions::max_depth"));
        }
        Ok(())
    }

    fn next(&mut self) -> Result<Spanned> {
        self.lexer.next_token().map_err(|err| self.with_path(err))
    }

    fn error(&self, kind: ErrorKind, pos: Position, message: impl Into<String>) -> GblnError {
        self.with_path(pos.error(kind, message))
    }

    fn unexpected(&self, token: &Token, pos: Position, expected: &str) -> GblnError {
        self.error(
            ErrorKind::UnexpectedToken,
            pos,
            format!("{expected}, found {}", token.describe()),
        )
    }

    fn unclosed_array(&self, open: Position) -> GblnError {
        let err = self.lexer.position().error(
            ErrorKind::UnexpectedEof,
            format!(
                "input ended before the ']' closing the array opened at line {}, column {}",
                open.line, open.column
            ),
        );
        self.with_path(err)
    }

    fn with_path(&self, err: GblnError) -> GblnError {
        if self.path.is_empty() {
            err
        } else {
            err.append_context(&format!("in '{}'", FieldPath(&self.path)))
        }
    }
}

//! Character cursor and structural tokeniser.
//!
//! The lexer owns the only cursor over the (comment-stripped) input. It
//! produces structural tokens for the parser and hands the same cursor to the
//! value-content scanner (see [`scanner`](crate::scanner)) once a `(` has been
//! consumed, so positions stay exact across both.
//!
//! Lines and columns are 1-based. Columns count characters, not bytes. A `\n`
//! starts a new line; `\r\n` therefore counts as a single line break.

use crate::error::{ErrorKind, GblnError, Result};
use crate::types::{self, TypeTag};

/// A 1-based line/column location in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub(crate) fn error(self, kind: ErrorKind, message: impl Into<String>) -> GblnError {
        GblnError::new(kind, self.line, self.column, message)
    }
}

/// A lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    /// A stray `>`; a well-formed `>` is consumed as part of a type hint.
    Gt,
    Identifier(String),
    /// A complete `<...>` type hint, already resolved.
    TypeHint(TypeTag),
    Eof,
}

impl Token {
    /// How the token reads in an error message.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::LBrace => "'{'".to_string(),
            Token::RBrace => "'}'".to_string(),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Identifier(name) => format!("identifier '{name}'"),
            Token::TypeHint(tag) => format!("type hint '<{tag}>'"),
            Token::Eof => "end of input".to_string(),
        }
    }
}

/// A token and the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: Position,
}

/// Tokeniser over a GBLN source string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !is_whitespace(c) {
                break;
            }
            self.bump();
        }
    }

    /// Skip whitespace and return the next token.
    pub fn next_token(&mut self) -> Result<Spanned> {
        self.skip_whitespace();
        let pos = self.position();
        let Some(c) = self.peek_char() else {
            return Ok(Spanned {
                token: Token::Eof,
                pos,
            });
        };

        let token = match c {
            '{' => self.single(Token::LBrace),
            '}' => self.single(Token::RBrace),
            '[' => self.single(Token::LBracket),
            ']' => self.single(Token::RBracket),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '>' => self.single(Token::Gt),
            '<' => self.type_hint(pos)?,
            c if is_ident_start(c) => self.identifier(),
            other => {
                return Err(pos.error(
                    ErrorKind::UnexpectedToken,
                    format!("unexpected character {other:?}"),
                ));
            }
        };
        Ok(Spanned { token, pos })
    }

    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    fn identifier(&mut self) -> Token {
        let start = self.offset;
        while let Some(c) = self.peek_char() {
            if !is_ident_continue(c) {
                break;
            }
            self.bump();
        }
        Token::Identifier(self.src[start..self.offset].to_string())
    }

    /// Lex `<base[width]>` starting at the `<`, resolving it immediately.
    fn type_hint(&mut self, start: Position) -> Result<Token> {
        self.bump();
        let begin = self.offset;
        while let Some(c) = self.peek_char() {
            if !c.is_ascii_alphanumeric() {
                break;
            }
            self.bump();
        }
        let src = self.src;
        let text = &src[begin..self.offset];

        match self.peek_char() {
            Some('>') => {
                self.bump();
            }
            Some(other) => {
                return Err(start
                    .error(
                        ErrorKind::InvalidTypeHint,
                        format!("expected '>' to close type hint '<{text}', found {other:?}"),
                    )
                    .with_suggestion("type hints look like <i32>, <s64> or <b>"));
            }
            None => {
                return Err(start.error(
                    ErrorKind::UnexpectedEof,
                    format!("input ended inside type hint '<{text}'"),
                ));
            }
        }

        types::resolve(text).map(Token::TypeHint).map_err(|err| {
            start
                .error(ErrorKind::InvalidTypeHint, err.message)
                .with_suggestion(err.suggestion)
        })
    }
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}


//! Value-content scanning.
//!
//! Once the parser has consumed a value's opening `(`, the scanner takes over
//! the lexer's cursor and collects everything up to the matching depth-zero
//! `)`. Inside a value only `(`, `)` and `\` are special:
//!
//! - an unescaped `(` opens a nested group and is kept literally
//! - an unescaped `)` closes a nested group (kept) or, at depth zero, ends the
//!   value (dropped)
//! - `\\`, `\n`, `\r`, `\t`, `\(` and `\)` decode to one character; any other
//!   backslash sequence is kept as written
//!
//! Homogeneous typed arrays also allow bare items (`tags<s8>[rust go]`),
//! which end at whitespace or `]` and decode the same escapes.

use crate::error::{ErrorKind, Result};
use crate::lexer::{is_whitespace, Lexer, Position};

/// Decoded value text and the position of its first content character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub text: String,
    pub pos: Position,
}

impl Lexer<'_> {
    /// Scan a parenthesised value. `open` is the position of the `(` that the
    /// caller has already consumed.
    pub fn scan_value(&mut self, open: Position) -> Result<RawValue> {
        let pos = self.position();
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.position().error(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "input ended before the ')' closing the value opened at line {}, column {}",
                        open.line, open.column
                    ),
                ));
            };
            match c {
                '\\' => self.decode_escape(&mut text),
                '(' => {
                    self.bump();
                    depth += 1;
                    text.push('(');
                }
                ')' if depth == 0 => {
                    self.bump();
                    return Ok(RawValue { text, pos });
                }
                ')' => {
                    self.bump();
                    depth -= 1;
                    text.push(')');
                }
                other => {
                    self.bump();
                    text.push(other);
                }
            }
        }
    }

    /// Scan a bare typed-array item up to whitespace, `]` or end of input.
    pub fn scan_bare_item(&mut self) -> RawValue {
        let pos = self.position();
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if is_whitespace(c) || c == ']' {
                break;
            }
            if c == '\\' {
                self.decode_escape(&mut text);
            } else {
                self.bump();
                text.push(c);
            }
        }
        RawValue { text, pos }
    }

    /// Consume a backslash and the escape it introduces. Unknown escapes keep
    /// the backslash and leave the following character for the caller.
    fn decode_escape(&mut self, out: &mut String) {
        self.bump();
        let decoded = match self.peek_char() {
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('(') => '(',
            Some(')') => ')',
            _ => {
                out.push('\\');
                return;
            }
        };
        self.bump();
        out.push(decoded);
    }
}

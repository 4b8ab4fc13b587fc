//! Renders a [`Value`] tree back to GBLN text.
//!
//! Two layouts share one writer:
//!
//! - **Compact** (`serialize`): no whitespace between structural tokens; the
//!   only spaces are the separators between homogeneous array items.
//! - **Pretty** (`serialize_pretty`): one record per line, nested containers
//!   indented by a configurable width, homogeneous arrays kept on one line.
//!
//! Both are total. Type hints are chosen from the values themselves: a
//! string's bound is the smallest power of two (at least 8) that holds it, and
//! an array whose items are all primitives of one variant is written as a
//! homogeneous typed array. Parsing the output yields an equal tree, with one
//! exception inherited from line-wise comment stripping: strings containing
//! `:|` do not survive a round trip.

use crate::types::TypeTag;
use crate::value::{Map, Value};

/// Serialise `value` compactly.
///
/// ```
/// use gbln_core::{parse, serialize};
/// let doc = parse("user{ id<u32>(1)  tags<s4>[a b] }").unwrap();
/// assert_eq!(serialize(&doc), "user{id<u32>(1)tags<s8>[a b]}");
/// ```
pub fn serialize(value: &Value) -> String {
    render(value, None)
}

/// Serialise `value` with one record per line, indenting nested containers by
/// `indent` spaces per level.
pub fn serialize_pretty(value: &Value, indent: usize) -> String {
    render(value, Some(indent))
}

fn render(value: &Value, indent: Option<usize>) -> String {
    let mut writer = Writer {
        out: String::new(),
        indent,
    };
    match value {
        Value::Object(map) => writer.records(map, 0),
        other => writer.item(other, 0),
    }
    tracing::trace!(bytes = writer.out.len(), pretty = indent.is_some(), "serialised GBLN");
    writer.out
}

struct Writer {
    out: String,
    /// `None` for compact output.
    indent: Option<usize>,
}

impl Writer {
    /// Start a new line at `depth` (pretty) or do nothing (compact).
    fn line(&mut self, depth: usize) {
        if let Some(width) = self.indent {
            if !self.out.is_empty() {
                self.out.push('\n');
            }
            self.out.extend(std::iter::repeat_n(' ', width * depth));
        }
    }

    /// Close a container opened at `depth`; empty containers stay on one line.
    fn close(&mut self, delimiter: char, depth: usize, empty: bool) {
        if !empty {
            self.line(depth);
        }
        self.out.push(delimiter);
    }

    fn records(&mut self, map: &Map, depth: usize) {
        for (key, value) in map {
            self.line(depth);
            self.out.push_str(key);
            self.body(value, depth);
        }
    }

    /// Everything after a key (records) or in place of one (array items).
    fn body(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Object(map) => {
                self.out.push('{');
                self.records(map, depth + 1);
                self.close('}', depth, map.is_empty());
            }
            Value::Array(items) => self.array(items, depth),
            primitive => {
                let tag = primitive_tag(primitive);
                self.out.push('<');
                self.out.push_str(&tag.to_string());
                self.out.push_str(">(");
                write_escaped(&mut self.out, &primitive_text(primitive));
                self.out.push(')');
            }
        }
    }

    fn item(&mut self, value: &Value, depth: usize) {
        self.line(depth);
        self.body(value, depth);
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if let Some(tag) = homogeneous_tag(items) {
            self.out.push('<');
            self.out.push_str(&tag.to_string());
            self.out.push_str(">[");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    self.out.push(' ');
                }
                write_bare_item(&mut self.out, item);
            }
            self.out.push(']');
            return;
        }

        self.out.push('[');
        for item in items {
            self.item(item, depth + 1);
        }
        self.close(']', depth, items.is_empty());
    }
}

/// The tag a primitive is written with.
fn primitive_tag(value: &Value) -> TypeTag {
    match value {
        Value::I8(_) => TypeTag::I8,
        Value::I16(_) => TypeTag::I16,
        Value::I32(_) => TypeTag::I32,
        Value::I64(_) => TypeTag::I64,
        Value::U8(_) => TypeTag::U8,
        Value::U16(_) => TypeTag::U16,
        Value::U32(_) => TypeTag::U32,
        Value::U64(_) => TypeTag::U64,
        Value::F32(_) => TypeTag::F32,
        Value::F64(_) => TypeTag::F64,
        Value::Str(s) => TypeTag::Str(string_bound(s.chars().count())),
        Value::Bool(_) => TypeTag::Bool,
        Value::Null | Value::Object(_) | Value::Array(_) => TypeTag::Null,
    }
}

/// Smallest power of two, at least 8, that holds `chars` characters.
fn string_bound(chars: usize) -> usize {
    chars.max(8).checked_next_power_of_two().unwrap_or(chars)
}

/// The shared tag of a non-empty array of same-variant primitives.
fn homogeneous_tag(items: &[Value]) -> Option<TypeTag> {
    let (first, rest) = items.split_first()?;
    if !first.is_primitive() {
        return None;
    }
    let variant = std::mem::discriminant(first);
    if rest.iter().any(|item| std::mem::discriminant(item) != variant) {
        return None;
    }

    match first {
        Value::Str(_) => {
            let longest = items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0);
            Some(TypeTag::Str(string_bound(longest)))
        }
        _ => Some(primitive_tag(first)),
    }
}

/// Unescaped text of a primitive as the validator would read it back.
fn primitive_text(value: &Value) -> String {
    match value {
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F32(x) => x.to_string(),
        Value::F64(x) => x.to_string(),
        Value::Str(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
    }
}

/// Write a typed-array item bare when it survives whitespace splitting,
/// parenthesised otherwise.
fn write_bare_item(out: &mut String, item: &Value) {
    let text = match item {
        Value::Null => "null".to_string(),
        other => primitive_text(other),
    };
    let bare_safe = !text.is_empty()
        && !text
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '(' | ')' | '[' | ']' | '\\'));
    if bare_safe {
        out.push_str(&text);
    } else {
        out.push('(');
        write_escaped(out, &text);
        out.push(')');
    }
}

/// Escape value text for use between `(` and `)`.
fn write_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
}

//! Type-driven conversion of raw value text into typed [`Value`]s.
//!
//! The validator knows nothing about positions: it returns an [`Invalid`]
//! describing what went wrong, and the parser locates it at the value's first
//! content character and adds the field path.

use crate::error::{ErrorKind, GblnError};
use crate::lexer::Position;
use crate::types::{TypeTag, SIGNED_WIDTHS, UNSIGNED_WIDTHS};
use crate::value::Value;

/// A rejected value, not yet tied to a source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Invalid {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub(crate) fn at(self, pos: Position) -> GblnError {
        let err = GblnError::new(self.kind, pos.line, pos.column, self.message);
        match self.suggestion {
            Some(suggestion) => err.with_suggestion(suggestion),
            None => err,
        }
    }
}

/// Convert `raw` (already escape-decoded) into a value of type `tag`.
///
/// ```
/// use gbln_core::{validator::validate_value, ErrorKind, TypeTag, Value};
/// assert_eq!(validate_value(" 42 ", TypeTag::U8), Ok(Value::U8(42)));
/// assert_eq!(validate_value("300", TypeTag::U8).unwrap_err().kind, ErrorKind::IntegerOutOfRange);
/// ```
pub fn validate_value(raw: &str, tag: TypeTag) -> Result<Value, Invalid> {
    match tag {
        TypeTag::I8
        | TypeTag::I16
        | TypeTag::I32
        | TypeTag::I64
        | TypeTag::U8
        | TypeTag::U16
        | TypeTag::U32
        | TypeTag::U64 => integer(raw, tag),
        TypeTag::F32 | TypeTag::F64 => float(raw, tag),
        TypeTag::Str(max) => string(raw, max),
        TypeTag::Bool => boolean(raw),
        TypeTag::Null => null(raw),
    }
}

fn integer(raw: &str, tag: TypeTag) -> Result<Value, Invalid> {
    let text = raw.trim();
    let (min, max) = tag.integer_bounds().unwrap_or((0, 0));
    let (sign, digits) = match text.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &text[1..]),
        _ => (None, text),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        let invalid = Invalid::new(
            ErrorKind::InvalidInteger,
            format!("expected a {tag} integer ({min} to {max}), found '{text}'"),
        );
        return Err(if looks_fractional(digits) {
            invalid.suggest("use f32 or f64 for fractional values")
        } else {
            invalid
        });
    }

    let Ok(parsed) = text.parse::<i128>() else {
        return Err(Invalid::new(
            ErrorKind::IntegerOutOfRange,
            format!("{text} is out of range for {tag} ({min} to {max})"),
        )
        .suggest(format!(
            "the value exceeds 64 bits; store it as a string, e.g. s{}",
            text.len()
        )));
    };

    if !tag.is_signed() && sign.is_some() && parsed >= 0 {
        return Err(Invalid::new(
            ErrorKind::InvalidInteger,
            format!("unsigned {tag} values take no sign, found '{text}'"),
        )
        .suggest(format!("write {digits}")));
    }

    let value = match tag {
        TypeTag::I8 => i8::try_from(parsed).ok().map(Value::I8),
        TypeTag::I16 => i16::try_from(parsed).ok().map(Value::I16),
        TypeTag::I32 => i32::try_from(parsed).ok().map(Value::I32),
        TypeTag::I64 => i64::try_from(parsed).ok().map(Value::I64),
        TypeTag::U8 => u8::try_from(parsed).ok().map(Value::U8),
        TypeTag::U16 => u16::try_from(parsed).ok().map(Value::U16),
        TypeTag::U32 => u32::try_from(parsed).ok().map(Value::U32),
        TypeTag::U64 => u64::try_from(parsed).ok().map(Value::U64),
        _ => None,
    };

    value.ok_or_else(|| {
        Invalid::new(
            ErrorKind::IntegerOutOfRange,
            format!("{parsed} is out of range for {tag} ({min} to {max})"),
        )
        .suggest(wider_types(parsed, tag))
    })
}

fn looks_fractional(digits: &str) -> bool {
    digits.contains('.') || digits.contains(['e', 'E'])
}

/// Name the next one or two integer types that can hold `value`.
fn wider_types(value: i128, tag: TypeTag) -> String {
    let fits = |t: &&TypeTag| {
        t.integer_bounds()
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&value))
    };
    let same_family: &[TypeTag] = if tag.is_signed() {
        &SIGNED_WIDTHS
    } else {
        &UNSIGNED_WIDTHS
    };

    let mut candidates: Vec<TypeTag> = same_family.iter().filter(fits).copied().collect();
    if candidates.is_empty() {
        let other_family: &[TypeTag] = if value < 0 {
            &SIGNED_WIDTHS
        } else {
            &UNSIGNED_WIDTHS
        };
        candidates = other_family.iter().filter(fits).copied().collect();
    }

    match candidates.as_slice() {
        [] => "the value exceeds 64 bits; store it as a string".to_string(),
        [only] => format!("use {only}"),
        [first, second, ..] => format!("use {first} or {second}"),
    }
}

fn float(raw: &str, tag: TypeTag) -> Result<Value, Invalid> {
    let text = raw.trim();
    let lower = text.to_ascii_lowercase();
    let special = matches!(lower.as_str(), "inf" | "+inf" | "-inf" | "nan");
    if !special && !is_decimal_literal(text) {
        return Err(Invalid::new(
            ErrorKind::InvalidFloat,
            format!("expected a {tag} number, found '{text}'"),
        )
        .suggest("write a decimal such as 3.14, scientific notation such as 1e-3, or inf/-inf/nan"));
    }

    let overflow = || {
        Invalid::new(
            ErrorKind::InvalidFloat,
            format!("{text} is out of range for {tag}"),
        )
    };
    match tag {
        TypeTag::F32 => match lower.parse::<f32>() {
            Ok(x) if x.is_infinite() && !special => Err(overflow().suggest("use f64")),
            Ok(x) => Ok(Value::F32(x)),
            Err(_) => Err(overflow()),
        },
        _ => match lower.parse::<f64>() {
            Ok(x) if x.is_infinite() && !special => Err(overflow()),
            Ok(x) => Ok(Value::F64(x)),
            Err(_) => Err(overflow()),
        },
    }
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with at least one mantissa digit.
fn is_decimal_literal(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

fn string(raw: &str, max: usize) -> Result<Value, Invalid> {
    let count = raw.chars().count();
    if count > max {
        return Err(Invalid::new(
            ErrorKind::StringTooLong,
            format!("string has {count} characters, s{max} allows at most {max}"),
        )
        .suggest(format!("use s{count} or larger")));
    }
    Ok(Value::Str(raw.to_string()))
}

fn boolean(raw: &str) -> Result<Value, Invalid> {
    let text = raw.trim();
    match text.to_ascii_lowercase().as_str() {
        "t" | "true" | "1" => Ok(Value::Bool(true)),
        "f" | "false" | "0" => Ok(Value::Bool(false)),
        _ => Err(Invalid::new(
            ErrorKind::InvalidBoolean,
            format!("expected a boolean, found '{text}'"),
        )
        .suggest("use true or false (t, f, 1 and 0 are also accepted)")),
    }
}

fn null(raw: &str) -> Result<Value, Invalid> {
    let text = raw.trim();
    match text.to_ascii_lowercase().as_str() {
        "" | "n" | "null" => Ok(Value::Null),
        _ => Err(Invalid::new(
            ErrorKind::InvalidNull,
            format!("expected null, found '{text}'"),
        )
        .suggest("write () or (null)")),
    }
}

//! Bounded type tags and the type-hint resolver.
//!
//! A type hint is the text between `<` and `>`: a base letter (`i`, `u`, `f`,
//! `s`, `b`, `n`) followed by an optional decimal width or length. The set of
//! tags is closed, so every consumer dispatches with a plain `match`.

use std::fmt;

/// The bounded type named by a `<...>` type hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// String of at most `max_chars` Unicode scalar values.
    Str(usize),
    Bool,
    Null,
}

/// Why a type hint failed to resolve. Carries the fix shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HintError {
    pub(crate) message: String,
    pub(crate) suggestion: String,
}

const VALID_HINTS: &str = "i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 s<N> b n";

impl TypeTag {
    /// Resolve the text of a type hint, without its angle brackets.
    ///
    /// ```
    /// use gbln_core::TypeTag;
    /// assert_eq!(TypeTag::from_hint("u32"), Some(TypeTag::U32));
    /// assert_eq!(TypeTag::from_hint("s64"), Some(TypeTag::Str(64)));
    /// assert_eq!(TypeTag::from_hint("i12"), None);
    /// ```
    pub fn from_hint(hint: &str) -> Option<TypeTag> {
        resolve(hint).ok()
    }

    /// Inclusive `(min, max)` range for integer tags.
    pub fn integer_bounds(self) -> Option<(i128, i128)> {
        let bounds = match self {
            TypeTag::I8 => (i8::MIN as i128, i8::MAX as i128),
            TypeTag::I16 => (i16::MIN as i128, i16::MAX as i128),
            TypeTag::I32 => (i32::MIN as i128, i32::MAX as i128),
            TypeTag::I64 => (i64::MIN as i128, i64::MAX as i128),
            TypeTag::U8 => (0, u8::MAX as i128),
            TypeTag::U16 => (0, u16::MAX as i128),
            TypeTag::U32 => (0, u32::MAX as i128),
            TypeTag::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(bounds)
    }

    pub fn is_integer(self) -> bool {
        self.integer_bounds().is_some()
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            TypeTag::I8 | TypeTag::I16 | TypeTag::I32 | TypeTag::I64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, TypeTag::F32 | TypeTag::F64)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::I8 => f.write_str("i8"),
            TypeTag::I16 => f.write_str("i16"),
            TypeTag::I32 => f.write_str("i32"),
            TypeTag::I64 => f.write_str("i64"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::F32 => f.write_str("f32"),
            TypeTag::F64 => f.write_str("f64"),
            TypeTag::Str(max) => write!(f, "s{max}"),
            TypeTag::Bool => f.write_str("b"),
            TypeTag::Null => f.write_str("n"),
        }
    }
}

/// Integer tags in widening order, used to suggest a type that fits.
pub(crate) const SIGNED_WIDTHS: [TypeTag; 4] = [TypeTag::I8, TypeTag::I16, TypeTag::I32, TypeTag::I64];
pub(crate) const UNSIGNED_WIDTHS: [TypeTag; 4] = [TypeTag::U8, TypeTag::U16, TypeTag::U32, TypeTag::U64];

/// Split a hint into its base letter and width digits, then map it onto a tag.
pub(crate) fn resolve(hint: &str) -> Result<TypeTag, HintError> {
    let mut chars = hint.chars();
    let Some(base) = chars.next() else {
        return Err(HintError {
            message: "empty type hint '<>'".to_string(),
            suggestion: format!("valid types: {VALID_HINTS}"),
        });
    };
    let width = chars.as_str();
    if !width.chars().all(|c| c.is_ascii_digit()) {
        return Err(unknown(hint));
    }

    match (base, width) {
        ('i', "8") => Ok(TypeTag::I8),
        ('i', "16") => Ok(TypeTag::I16),
        ('i', "32") => Ok(TypeTag::I32),
        ('i', "64") => Ok(TypeTag::I64),
        ('u', "8") => Ok(TypeTag::U8),
        ('u', "16") => Ok(TypeTag::U16),
        ('u', "32") => Ok(TypeTag::U32),
        ('u', "64") => Ok(TypeTag::U64),
        ('f', "32") => Ok(TypeTag::F32),
        ('f', "64") => Ok(TypeTag::F64),
        ('b', "") => Ok(TypeTag::Bool),
        ('n', "") => Ok(TypeTag::Null),
        ('i' | 'u', _) => Err(HintError {
            message: format!("unknown integer type '{hint}'"),
            suggestion: format!("integer widths are 8, 16, 32 and 64, e.g. {base}32"),
        }),
        ('f', _) => Err(HintError {
            message: format!("unknown float type '{hint}'"),
            suggestion: "float widths are 32 and 64: use f32 or f64".to_string(),
        }),
        ('s', "") => Err(HintError {
            message: "string type without a length".to_string(),
            suggestion: "string types need a length, e.g. s64".to_string(),
        }),
        ('s', digits) => match digits.parse::<usize>() {
            Ok(0) => Err(HintError {
                message: "string length must be positive".to_string(),
                suggestion: "use s1 or larger".to_string(),
            }),
            Ok(max) => Ok(TypeTag::Str(max)),
            Err(_) => Err(HintError {
                message: format!("string length in '{hint}' is too large"),
                suggestion: format!("use at most s{}", usize::MAX),
            }),
        },
        ('b' | 'n', _) => Err(HintError {
            message: format!("type '{base}' takes no width, found '{hint}'"),
            suggestion: format!("write <{base}>"),
        }),
        _ => Err(unknown(hint)),
    }
}

fn unknown(hint: &str) -> HintError {
    HintError {
        message: format!("unknown type hint '{hint}'"),
        suggestion: format!("valid types: {VALID_HINTS}"),
    }
}

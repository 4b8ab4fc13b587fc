//! # gbln-core
//!
//! Parser, validator and serialiser for **GBLN**.
//!
//! GBLN is a compact text format where every value declares a bounded type
//! and is checked against it while parsing: integers against their exact
//! width and signedness, strings against a maximum character count, booleans
//! and nulls against a small set of spellings. A document that parses is a
//! document whose values are all in range.
//!
//! ## Quick start
//!
//! ```rust
//! use gbln_core::{parse, serialize, ErrorKind, Value};
//!
//! let doc = parse("user{id<u32>(12345) name<s64>(Alice) tags<s16>[rust go]}").unwrap();
//! assert_eq!(doc.get_path("user.id"), Some(&Value::U32(12345)));
//! assert_eq!(doc.get_path("user.tags.0").and_then(Value::as_str), Some("rust"));
//!
//! // Serialise and parse back
//! assert_eq!(parse(&serialize(&doc)).unwrap(), doc);
//!
//! // Bounds are enforced at parse time
//! let err = parse("age<i8>(128)").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::IntegerOutOfRange);
//! assert_eq!(err.suggestion(), Some("use i16 or i32"));
//! ```
//!
//! ## Pipeline
//!
//! text → [`comment`] → [`lexer`] / [`scanner`] → parser (consulting
//! [`types`] and [`validator`]) → [`Value`] tree → [`serializer`] → text.
//!
//! ## Modules
//!
//! - [`comment`]: `:|` line comment removal
//! - [`lexer`]: structural tokens and type hints with line/column tracking
//! - [`scanner`]: value content between `(` and its matching `)`
//! - [`types`]: [`TypeTag`] and the type-hint resolver
//! - [`validator`]: raw text + tag → typed value
//! - [`value`]: the [`Value`] tree and its accessors
//! - [`serializer`]: compact and pretty output
//! - [`options`]: [`ParseOptions`]
//! - [`error`]: [`GblnError`] and [`ErrorKind`]

pub mod comment;
pub mod error;
pub mod lexer;
pub mod options;
mod parser;
pub mod scanner;
pub mod serializer;
pub mod types;
pub mod validator;
pub mod value;

pub use comment::strip_comments;
pub use error::{ErrorKind, GblnError, Result};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, parse_with_options, validate, validate_with_options};
pub use serializer::{serialize, serialize_pretty};
pub use types::TypeTag;
pub use value::{Map, Value};

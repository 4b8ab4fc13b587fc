//! Parser configuration.

use serde::Deserialize;

/// Default container nesting ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for [`parse_with_options`](crate::parse_with_options).
///
/// Derives `Deserialize` so front-ends can embed it in their own config files:
///
/// ```
/// let options: gbln_core::ParseOptions = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
/// assert_eq!(options.max_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum number of nested objects/arrays. A top-level container is at
    /// depth 1; opening a container deeper than this fails with
    /// [`ErrorKind::MaxDepthExceeded`](crate::ErrorKind::MaxDepthExceeded).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

//! Line comment removal, run once before lexing.
//!
//! A comment starts at the first `:|` on a line and runs to the end of that
//! line. Stripping is line-wise and unaware of value delimiters, so a value
//! that contains the literal text `:|` is truncated at that point. Line
//! terminators are kept, which keeps lexer line and column numbers aligned
//! with the original input.

/// Comment marker.
pub const COMMENT_MARKER: &str = ":|";

/// Remove every `:|` comment from `input`, preserving all line breaks.
///
/// ```
/// use gbln_core::strip_comments;
/// assert_eq!(strip_comments("a<i8>(1) :| note\nb<i8>(2)"), "a<i8>(1) \nb<i8>(2)");
/// ```
pub fn strip_comments(input: &str) -> String {
    if !input.contains(COMMENT_MARKER) {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    for line in input.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        match body.find(COMMENT_MARKER) {
            Some(pos) => out.push_str(&body[..pos]),
            None => out.push_str(body),
        }
        out.push_str(terminator);
    }
    out
}

/// Split a line from `split_inclusive('\n')` into its content and its
/// `\n` or `\r\n` terminator (empty on the final line).
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

//! Capture-group accounting for constraint expressions
//!
//! Group numbers are reserved by scanning the constraint text, not by asking
//! the regex engine. The scan rules:
//!
//! - a `(` at offset 0 counts
//! - any other `(` counts unless the byte before it is `\`
//!
//! The second rule looks at one byte only, so `\\(` (an escaped backslash
//! followed by a real group) is *not* counted. Non-capturing groups such as
//! `(?:x)` *are* counted.

/// Counts the opening parentheses of `expr` that reserve a group number
///
/// # Examples
///
/// ```
/// use pathway_router::template::groups::group_count;
///
/// assert_eq!(group_count(r"\d+"), 0);
/// assert_eq!(group_count("(x)(y)"), 2);
/// assert_eq!(group_count(r"a\(b"), 0);
/// ```
pub fn group_count(expr: &str) -> usize {
    let bytes = expr.as_bytes();

    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'(' && (i == 0 || bytes[i - 1] != b'\\'))
        .count()
}

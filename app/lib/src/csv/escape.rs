//! Quote un-escaping for quoted CSV fields.
//!
//! Inside a quoted field a literal `"` is written as `""`. Unquoted fields
//! are never un-escaped.

use std::borrow::Cow;

/// Replace every `""` pair in `inner` with a single `"`.
///
/// `inner` is the content between the opening and closing quotes. Pairs are
/// matched left to right without overlap, so `""""` becomes `""`. Returns a
/// borrowed slice when there is nothing to replace.
///
/// # Example
///
/// ```
/// use formcsv::csv::unescape_quoted;
///
/// assert_eq!(unescape_quoted(r#"say ""hi"""#), r#"say "hi""#);
/// assert_eq!(unescape_quoted("plain"), "plain");
/// ```
pub fn unescape_quoted(inner: &str) -> Cow<'_, str> {
    if inner.contains("\"\"") {
        Cow::Owned(inner.replace("\"\"", "\""))
    } else {
        Cow::Borrowed(inner)
    }
}

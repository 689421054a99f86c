//! Escape-artifact stripping for text that was serialized one time too many.

use std::borrow::Cow;

use memchr::memchr;

/// Escape sequences in replacement order. Multi-character sequences run
/// before the quote escapes, and the backslash escape runs last so that it
/// cannot manufacture new escapes for earlier rules.
const ESCAPE_REPLACEMENTS: &[(&str, &str)] = &[
    ("\\r\\n", "\n"),
    ("\\n", "\n"),
    ("\\t", "\t"),
    ("\\\"", "\""),
    ("\\'", "'"),
    ("\\\\", "\\"),
];

/// Replace backslash escape sequences with their literal characters.
///
/// Total and pure. Text without any backslash is returned borrowed.
#[must_use]
pub fn normalize(text: &str) -> Cow<'_, str> {
    if memchr(b'\\', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = text.to_string();
    for (from, to) in ESCAPE_REPLACEMENTS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    Cow::Owned(out)
}

//! Record content formatting

use std::borrow::Cow;

/// Wraps multi-word content in double quotes.
///
/// A value containing a space is wrapped in exactly one pair of quotes unless
/// it already starts or ends with one. Everything else passes through. Applying
/// the rule twice yields the same result as applying it once.
pub fn quote_if_spaced(content: &str) -> Cow<'_, str> {
    if content.contains(' ') && !content.starts_with('"') && !content.ends_with('"') {
        Cow::Owned(format!("\"{content}\""))
    } else {
        Cow::Borrowed(content)
    }
}

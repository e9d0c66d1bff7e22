//! Log sanitization utilities
//!
//! Response bodies can be large (a full zone listing) and request headers carry
//! the bearer token. Everything that reaches a log line goes through here.

/// Maximum number of bytes of a body to include in a log line.
const BODY_LOG_LIMIT: usize = 256;

/// Number of leading token characters kept visible when redacting.
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// Cuts `s` down to at most `BODY_LOG_LIMIT` bytes without splitting a character.
///
/// Longer values get a suffix with the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= BODY_LOG_LIMIT {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= BODY_LOG_LIMIT)
        .last()
        .unwrap_or(0);

    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Hides all but the first few characters of a credential.
pub fn redact_token(token: &str) -> String {
    let visible: String = token.chars().take(TOKEN_VISIBLE_PREFIX).collect();
    if visible.len() == token.len() {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

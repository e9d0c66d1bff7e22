//! Utility modules.

/// Quoting rule applied to record content on the way out.
pub mod content;

/// Wire timestamp parsing and formatting.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;

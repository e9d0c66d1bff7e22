//! Field validation shared by [`RecordBuilder`](crate::RecordBuilder) and
//! [`RecordOverlay`](crate::RecordOverlay).

use crate::error::{Result, ZoneError};
use crate::record_type::RecordType;

/// Smallest TTL the provider accepts (1 minute).
pub const MIN_TTL: u32 = 60;
/// Largest TTL the provider accepts (1 day).
pub const MAX_TTL: u32 = 86_400;
/// TTL applied when a new record does not set one.
pub const DEFAULT_TTL: u32 = 300;

pub(crate) fn name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ZoneError::invalid_argument("name", "cannot be blank"));
    }
    if name.contains(' ') {
        return Err(ZoneError::invalid_argument("name", "cannot contain spaces"));
    }
    Ok(())
}

pub(crate) fn content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(ZoneError::invalid_argument("content", "cannot be blank"));
    }
    Ok(())
}

pub(crate) fn ttl(ttl: u32) -> Result<()> {
    if ttl < MIN_TTL {
        return Err(ZoneError::invalid_argument(
            "ttl",
            format!("must be at least 1 minute ({MIN_TTL} seconds), got {ttl}"),
        ));
    }
    if ttl > MAX_TTL {
        return Err(ZoneError::invalid_argument(
            "ttl",
            format!("cannot be greater than 1 day ({MAX_TTL} seconds), got {ttl}"),
        ));
    }
    Ok(())
}

pub(crate) fn proxied(record_type: RecordType, proxiable: bool, proxied: bool) -> Result<()> {
    if proxied && !proxiable {
        return Err(ZoneError::invalid_argument(
            "proxied",
            format!("{record_type} records cannot be proxied"),
        ));
    }
    Ok(())
}

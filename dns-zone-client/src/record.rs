//! Immutable DNS record snapshot

use std::borrow::Cow;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Result, ZoneError};
use crate::record_type::RecordType;
use crate::utils::content::quote_if_spaced;
use crate::utils::datetime::{format_timestamp, parse_timestamp};

/// Unit for [`Record::ttl_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Converts a number of seconds into this unit, truncating towards zero.
    pub const fn convert(self, seconds: u64) -> u64 {
        match self {
            Self::Nanoseconds => seconds.saturating_mul(1_000_000_000),
            Self::Microseconds => seconds.saturating_mul(1_000_000),
            Self::Milliseconds => seconds.saturating_mul(1_000),
            Self::Seconds => seconds,
            Self::Minutes => seconds / 60,
            Self::Hours => seconds / 3_600,
            Self::Days => seconds / 86_400,
        }
    }
}

/// A DNS record as the server last reported it.
///
/// Records are only ever produced by decoding a server payload or by cloning
/// another record, so every instance reflects something the server returned.
/// Equality is structural over all fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub struct Record {
    id: String,
    name: String,
    record_type: RecordType,
    content: String,
    proxiable: bool,
    proxied: bool,
    ttl: u32,
    comment: Option<String>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Record {
    /// Decodes a record from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ZoneError::malformed("record", e.to_string()))?;
        Self::try_from(value)
    }

    /// Provider-assigned identifier, stable for the record's lifetime.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fully qualified hostname.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Content with multi-word values wrapped in double quotes.
    pub fn content(&self) -> Cow<'_, str> {
        quote_if_spaced(&self.content)
    }

    /// Content exactly as the server returned it.
    pub fn raw_content(&self) -> &str {
        &self.content
    }

    pub fn is_proxiable(&self) -> bool {
        self.proxiable
    }

    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// TTL in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl))
    }

    /// TTL converted to `unit`.
    pub fn ttl_as(&self, unit: TimeUnit) -> u64 {
        unit.convert(u64::from(self.ttl))
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

impl TryFrom<Value> for Record {
    type Error = ZoneError;

    fn try_from(value: Value) -> Result<Self> {
        let obj = match value {
            Value::Object(obj) => obj,
            other => {
                return Err(ZoneError::malformed(
                    "record",
                    format!("must be an object, got {}", json_kind(&other)),
                ));
            }
        };

        let record_type = RecordType::parse(&string_field(&obj, "type")?)
            .map_err(|e| ZoneError::malformed("type", e.to_string()))?;

        let record = Self {
            id: string_field(&obj, "id")?,
            name: string_field(&obj, "name")?,
            record_type,
            content: string_field(&obj, "content")?,
            proxiable: bool_field(&obj, "proxiable")?,
            proxied: bool_field(&obj, "proxied")?,
            ttl: ttl_field(&obj)?,
            comment: comment_field(&obj)?,
            created: timestamp_field(&obj, "created_on")?,
            modified: timestamp_field(&obj, "modified_on")?,
        };

        if record.proxied && !record.proxiable {
            return Err(ZoneError::malformed(
                "proxied",
                "is true on a record that is not proxiable",
            ));
        }
        if record.modified < record.created {
            return Err(ZoneError::malformed("modified_on", "precedes created_on"));
        }

        Ok(record)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            id: &'a str,
            name: &'a str,
            #[serde(rename = "type")]
            record_type: RecordType,
            content: &'a str,
            proxiable: bool,
            proxied: bool,
            ttl: u32,
            comment: Option<&'a str>,
            created_on: String,
            modified_on: String,
        }

        Wire {
            id: &self.id,
            name: &self.name,
            record_type: self.record_type,
            content: &self.content,
            proxiable: self.proxiable,
            proxied: self.proxied,
            ttl: self.ttl,
            comment: self.comment.as_deref(),
            created_on: format_timestamp(&self.created),
            modified_on: format_timestamp(&self.modified),
        }
        .serialize(serializer)
    }
}

// ============ Field extraction ============

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| ZoneError::malformed(key, "is missing"))
}

fn mismatch(key: &str, expected: &str, got: &Value) -> ZoneError {
    ZoneError::malformed(key, format!("must be {expected}, got {}", json_kind(got)))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Result<String> {
    let value = required(obj, key)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(key, "a string", value))
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Result<bool> {
    let value = required(obj, key)?;
    value
        .as_bool()
        .ok_or_else(|| mismatch(key, "a boolean", value))
}

fn ttl_field(obj: &Map<String, Value>) -> Result<u32> {
    let value = required(obj, "ttl")?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| mismatch("ttl", "an unsigned 32-bit integer", value))
}

fn comment_field(obj: &Map<String, Value>) -> Result<Option<String>> {
    match obj.get("comment") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch("comment", "a string or null", other)),
    }
}

fn timestamp_field(obj: &Map<String, Value>, key: &str) -> Result<DateTime<Utc>> {
    let value = required(obj, key)?;
    let text = value
        .as_str()
        .ok_or_else(|| mismatch(key, "a timestamp string", value))?;
    parse_timestamp(text)
        .ok_or_else(|| ZoneError::malformed(key, format!("is not a valid timestamp: '{text}'")))
}

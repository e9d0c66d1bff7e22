//! Validated assembly of new records

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};
use crate::record_type::RecordType;
use crate::utils::content::quote_if_spaced;
use crate::validate::{self, DEFAULT_TTL};

/// Request body for `POST /zones/{zone_id}/dns_records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordPayload {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Collects and validates the fields of a record before it is created.
///
/// Each setter checks its input immediately, so a builder never holds a value
/// the provider would reject for range or format reasons.
///
/// ```
/// use dns_zone_client::{RecordBuilder, RecordType};
///
/// # fn main() -> dns_zone_client::Result<()> {
/// let payload = RecordBuilder::new(RecordType::Txt)?
///     .name("hello-world.example.com")?
///     .content("This is a test record.")?
///     .build()?;
///
/// assert_eq!(payload.ttl, 300);
/// assert_eq!(payload.content, "\"This is a test record.\"");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record_type: RecordType,
    name: Option<String>,
    content: Option<String>,
    proxied: bool,
    ttl: Option<u32>,
    comment: Option<String>,
}

impl RecordBuilder {
    /// Starts a builder bound to `record_type`.
    ///
    /// Fails for types whose payload needs structured data that is not modelled
    /// yet (see [`RecordType::is_buildable`]).
    pub fn new(record_type: RecordType) -> Result<Self> {
        if !record_type.is_buildable() {
            return Err(ZoneError::invalid_argument(
                "type",
                format!("{record_type} records are currently not implemented"),
            ));
        }

        Ok(Self {
            record_type,
            name: None,
            content: None,
            proxied: false,
            ttl: None,
            comment: None,
        })
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Fully qualified hostname; must not be blank or contain spaces.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate::name(&name)?;
        self.name = Some(name);
        Ok(self)
    }

    pub fn content(mut self, content: impl Into<String>) -> Result<Self> {
        let content = content.into();
        validate::content(&content)?;
        self.content = Some(content);
        Ok(self)
    }

    pub fn proxied(mut self, proxied: bool) -> Result<Self> {
        validate::proxied(self.record_type, self.record_type.is_proxiable(), proxied)?;
        self.proxied = proxied;
        Ok(self)
    }

    /// TTL in seconds, within `[MIN_TTL, MAX_TTL]`.
    pub fn ttl(mut self, ttl: u32) -> Result<Self> {
        validate::ttl(ttl)?;
        self.ttl = Some(ttl);
        Ok(self)
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn clear_comment(mut self) -> Self {
        self.comment = None;
        self
    }

    /// Produces the create payload.
    ///
    /// Fails if name or content was never set. The builder is left intact.
    pub fn build(&self) -> Result<CreateRecordPayload> {
        let name = self
            .name
            .as_deref()
            .ok_or_else(|| ZoneError::invalid_argument("name", "is required"))?;
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| ZoneError::invalid_argument("content", "is required"))?;

        Ok(CreateRecordPayload {
            record_type: self.record_type,
            name: name.to_string(),
            content: quote_if_spaced(content).into_owned(),
            ttl: self.ttl.unwrap_or(DEFAULT_TTL),
            proxied: self.proxied,
            comment: self.comment.clone(),
        })
    }
}

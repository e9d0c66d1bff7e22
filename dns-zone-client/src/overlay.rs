//! Pending changes to an existing record

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::Record;
use crate::record_type::RecordType;
use crate::utils::content::quote_if_spaced;
use crate::validate;

/// Request body for `PUT /zones/{zone_id}/dns_records/{id}`.
///
/// The endpoint replaces the whole record, so every field is sent even when
/// it did not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecordPayload {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub content: String,
    pub proxied: bool,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Write intent layered over a fetched [`Record`].
///
/// The base record is kept untouched; each accessor returns the override when
/// one is set and the base value otherwise.
#[derive(Debug, Clone)]
pub struct RecordOverlay {
    base: Record,
    content: Option<String>,
    proxied: Option<bool>,
    ttl: Option<u32>,
    /// `Some(None)` clears the comment.
    comment: Option<Option<String>>,
}

impl RecordOverlay {
    pub fn new(base: Record) -> Self {
        Self {
            base,
            content: None,
            proxied: None,
            ttl: None,
            comment: None,
        }
    }

    /// The record as fetched, without overrides.
    pub fn base(&self) -> &Record {
        &self.base
    }

    pub fn into_base(self) -> Record {
        self.base
    }

    pub fn is_modified(&self) -> bool {
        self.content.is_some()
            || self.proxied.is_some()
            || self.ttl.is_some()
            || self.comment.is_some()
    }

    /// Drops every override.
    pub fn reset(&mut self) {
        self.content = None;
        self.proxied = None;
        self.ttl = None;
        self.comment = None;
    }

    // ============ Overrides ============

    pub fn modify_content(&mut self, content: impl Into<String>) -> Result<&mut Self> {
        let content = content.into();
        validate::content(&content)?;
        self.content = Some(content);
        Ok(self)
    }

    /// Only allowed when the base record is proxiable.
    pub fn modify_proxied(&mut self, proxied: bool) -> Result<&mut Self> {
        if !self.base.is_proxiable() {
            // 与 builder 不同：即使 proxied=false 也拒绝，不可代理的记录没有可修改的代理状态
            validate::proxied(self.base.record_type(), false, true)?;
        }
        self.proxied = Some(proxied);
        Ok(self)
    }

    pub fn modify_ttl(&mut self, ttl: u32) -> Result<&mut Self> {
        validate::ttl(ttl)?;
        self.ttl = Some(ttl);
        Ok(self)
    }

    /// `None` removes the comment from the record.
    pub fn modify_comment(&mut self, comment: Option<String>) -> &mut Self {
        self.comment = Some(comment);
        self
    }

    // ============ Effective values ============

    pub fn id(&self) -> &str {
        self.base.id()
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn record_type(&self) -> RecordType {
        self.base.record_type()
    }

    /// Effective content, quoted by the same rule as [`Record::content`].
    pub fn content(&self) -> Cow<'_, str> {
        match &self.content {
            Some(content) => quote_if_spaced(content),
            None => self.base.content(),
        }
    }

    pub fn is_proxiable(&self) -> bool {
        self.base.is_proxiable()
    }

    pub fn is_proxied(&self) -> bool {
        self.proxied.unwrap_or_else(|| self.base.is_proxied())
    }

    pub fn ttl(&self) -> u32 {
        self.ttl.unwrap_or_else(|| self.base.ttl())
    }

    pub fn comment(&self) -> Option<&str> {
        match &self.comment {
            Some(comment) => comment.as_deref(),
            None => self.base.comment(),
        }
    }

    /// Full update payload built from the effective values.
    pub fn render(&self) -> UpdateRecordPayload {
        UpdateRecordPayload {
            id: self.id().to_string(),
            name: self.name().to_string(),
            record_type: self.record_type(),
            content: self.content().into_owned(),
            proxied: self.is_proxied(),
            ttl: self.ttl(),
            comment: self.comment().map(str::to_string),
        }
    }
}

impl From<Record> for RecordOverlay {
    fn from(record: Record) -> Self {
        Self::new(record)
    }
}

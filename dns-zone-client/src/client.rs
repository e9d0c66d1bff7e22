//! Zone client: record lifecycle with write-then-confirm reconciliation
//!
//! Every mutation is followed by a fresh read of the zone. The client keeps no
//! record state of its own; the server is the only source of truth.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::builder::CreateRecordPayload;
use crate::config::{HttpConfig, ZoneCredentials};
use crate::envelope::{self, Envelope};
use crate::error::{Result, ZoneError};
use crate::http_client::HttpTransport;
use crate::overlay::RecordOverlay;
use crate::record::Record;
use crate::transport::{HttpMethod, Transport, TransportRequest};

/// Records requested per page when listing the zone.
const RECORDS_PER_PAGE: u32 = 5_000;

/// Manages the records of a single zone.
///
/// Operations run their round trips one after another: one request per page
/// for listing, and a send followed by a full re-read for each mutation.
pub struct ZoneClient<T = HttpTransport> {
    zone_id: String,
    transport: T,
}

impl ZoneClient<HttpTransport> {
    /// Builds a client that talks to the Cloudflare API over HTTPS.
    pub fn from_credentials(credentials: ZoneCredentials, config: &HttpConfig) -> Result<Self> {
        credentials.validate()?;
        let ZoneCredentials { zone_id, api_token } = credentials;
        let transport = HttpTransport::new(api_token, config)?;
        Ok(Self::new(zone_id, transport))
    }
}

impl<T: Transport> ZoneClient<T> {
    pub fn new(zone_id: impl Into<String>, transport: T) -> Self {
        Self {
            zone_id: zone_id.into(),
            transport,
        }
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn records_path(&self) -> String {
        format!("/zones/{}/dns_records", urlencoding::encode(&self.zone_id))
    }

    fn record_path(&self, record_id: &str) -> String {
        format!("{}/{}", self.records_path(), urlencoding::encode(record_id))
    }

    async fn call(&self, request: TransportRequest) -> Result<Envelope> {
        let response = self.transport.send(request).await?;
        envelope::accept(response).inspect_err(|e| log::error!("[zone {}] {e}", self.zone_id))
    }

    /// Fetches every record in the zone.
    ///
    /// Entries sharing an ID collapse into one. When the zone changes between
    /// page fetches, the copy from the later page wins.
    pub async fn list_records(&self) -> Result<HashSet<Record>> {
        Ok(self.fetch_all().await?.into_values().collect())
    }

    /// Fresh snapshot of the zone indexed by record ID.
    pub async fn record_map(&self) -> Result<HashMap<String, Record>> {
        self.fetch_all().await
    }

    async fn fetch_all(&self) -> Result<HashMap<String, Record>> {
        let mut records = HashMap::new();
        let mut page: u32 = 1;

        loop {
            let path = format!(
                "{}?page={page}&per_page={RECORDS_PER_PAGE}",
                self.records_path()
            );
            let envelope = self.call(TransportRequest::new(HttpMethod::Get, path)).await?;
            let total_pages = envelope.result_info.and_then(|info| info.total_pages);

            let Value::Array(items) = envelope.result else {
                return Err(ZoneError::protocol("list 'result' is not an array"));
            };
            for item in items {
                let record = Record::try_from(item)?;
                if let Some(previous) = records.insert(record.id().to_string(), record)
                    && records.get(previous.id()) != Some(&previous)
                {
                    log::debug!(
                        "[zone {}] {} changed while paging, keeping the later copy",
                        self.zone_id,
                        previous.id()
                    );
                }
            }

            match total_pages {
                Some(total) if page < total => page += 1,
                _ => break,
            }
        }

        log::debug!("[zone {}] fetched {} records", self.zone_id, records.len());
        Ok(records)
    }

    /// Looks up one record by ID in a fresh snapshot.
    pub async fn get_record(&self, record_id: &str) -> Result<Option<Record>> {
        Ok(self.record_map().await?.remove(record_id))
    }

    /// Creates a record and confirms it against a fresh read of the zone.
    ///
    /// Fails with [`ZoneError::ReconciliationFailure`] when the server accepted
    /// the write but the follow-up read does not contain an identical record.
    pub async fn create_record(&self, payload: &CreateRecordPayload) -> Result<Record> {
        let body = serde_json::to_string(payload)?;
        let request =
            TransportRequest::new(HttpMethod::Post, self.records_path()).with_json_body(body);
        let created = Record::try_from(self.call(request).await?.result)?;

        let mut live = self.record_map().await?;
        let err = match live.remove(created.id()) {
            None => ZoneError::reconciliation(
                created.id(),
                "record is missing from the zone after creation",
            ),
            Some(fetched) if fetched != created => ZoneError::reconciliation(
                created.id(),
                "fetched record does not match the created record",
            ),
            Some(_) => {
                log::debug!(
                    "[zone {}] created {} {} ({})",
                    self.zone_id,
                    created.record_type(),
                    created.name(),
                    created.id()
                );
                return Ok(created);
            }
        };

        log::error!("[zone {}] {err}", self.zone_id);
        Err(err)
    }

    /// Sends the overlay's full payload and reports whether the zone now
    /// holds exactly the record the server returned.
    ///
    /// A mismatch is returned as `false`, not as an error.
    pub async fn update_record(&self, overlay: &RecordOverlay) -> Result<bool> {
        let body = serde_json::to_string(&overlay.render())?;
        let request = TransportRequest::new(HttpMethod::Put, self.record_path(overlay.id()))
            .with_json_body(body);
        let updated = Record::try_from(self.call(request).await?.result)?;

        let confirmed = self.record_map().await?.get(overlay.id()) == Some(&updated);
        if confirmed {
            log::debug!("[zone {}] updated {}", self.zone_id, overlay.id());
        } else {
            log::warn!(
                "[zone {}] update of {} not confirmed by the zone",
                self.zone_id,
                overlay.id()
            );
        }
        Ok(confirmed)
    }

    /// Deletes a record and reports whether its ID is gone from the zone.
    pub async fn delete_record(&self, record: &Record) -> Result<bool> {
        let request = TransportRequest::new(HttpMethod::Delete, self.record_path(record.id()));
        self.call(request).await?;

        let gone = !self.record_map().await?.contains_key(record.id());
        if gone {
            log::debug!("[zone {}] deleted {}", self.zone_id, record.id());
        } else {
            log::warn!(
                "[zone {}] {} still present after delete",
                self.zone_id,
                record.id()
            );
        }
        Ok(gone)
    }
}

impl<T> std::fmt::Debug for ZoneClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneClient")
            .field("zone_id", &self.zone_id)
            .finish_non_exhaustive()
    }
}

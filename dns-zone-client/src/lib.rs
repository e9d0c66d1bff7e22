//! # dns-zone-client
//!
//! A client for the DNS records of a single Cloudflare zone.
//!
//! Records fetched from the API are immutable snapshots. New records are
//! assembled with a validating [`RecordBuilder`], and changes to existing ones
//! are staged on a [`RecordOverlay`]. Every mutation sent through
//! [`ZoneClient`] is followed by a fresh read of the zone, so a call only
//! reports success once the server's state agrees with what was written.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_zone_client::{
//!     HttpConfig, RecordBuilder, RecordOverlay, RecordType, ZoneClient, ZoneCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Connect to a zone
//!     let credentials = ZoneCredentials::new("your-zone-id", "your-token");
//!     let client = ZoneClient::from_credentials(credentials, &HttpConfig::default())?;
//!
//!     // 2. Create a record; the returned record is already confirmed
//!     let payload = RecordBuilder::new(RecordType::Txt)?
//!         .name("hello-world.example.com")?
//!         .content("This is a test record.")?
//!         .build()?;
//!     let record = client.create_record(&payload).await?;
//!
//!     // 3. Change its TTL
//!     let mut overlay = RecordOverlay::new(record.clone());
//!     overlay.modify_ttl(3600)?;
//!     if !client.update_record(&overlay).await? {
//!         eprintln!("update of {} not confirmed", record.id());
//!     }
//!
//!     // 4. Remove it again
//!     client.delete_record(&record).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ZoneError>`](ZoneError):
//!
//! - [`ZoneError::InvalidArgument`]: rejected input, raised before any network access
//! - [`ZoneError::MalformedRecord`]: a record payload from the API is incomplete or mistyped
//! - [`ZoneError::TransportFailure`]: network error, timeout, or non-200 response
//! - [`ZoneError::ProtocolFailure`]: the response envelope does not report success
//! - [`ZoneError::ReconciliationFailure`]: a created record could not be confirmed
//!
//! Nothing is retried automatically.

mod builder;
mod client;
mod config;
mod envelope;
mod error;
mod http_client;
mod overlay;
mod record;
mod record_type;
mod transport;
mod utils;
mod validate;

// Re-export error types
pub use error::{Result, ZoneError};

pub use builder::{CreateRecordPayload, RecordBuilder};
pub use client::ZoneClient;
pub use config::{CF_API_BASE, HttpConfig, ZoneCredentials};
pub use http_client::HttpTransport;
pub use overlay::{RecordOverlay, UpdateRecordPayload};
pub use record::{Record, TimeUnit};
pub use record_type::RecordType;
pub use transport::{HttpMethod, Transport, TransportRequest, TransportResponse};
pub use validate::{DEFAULT_TTL, MAX_TTL, MIN_TTL};

pub use utils::content::quote_if_spaced;
pub use utils::datetime;

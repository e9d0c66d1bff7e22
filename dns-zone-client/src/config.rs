//! Client configuration

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};
use crate::utils::log_sanitizer::redact_token;

/// Default API base URL.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Identifies the zone and authenticates against it.
///
/// `Debug` output never contains the full token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCredentials {
    pub zone_id: String,
    pub api_token: String,
}

impl ZoneCredentials {
    pub fn new(zone_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            api_token: api_token.into(),
        }
    }

    /// Reads `zoneId` and `apiToken` from a flat key-value map.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let credentials = Self {
            zone_id: required_field(map, "zoneId")?,
            api_token: required_field(map, "apiToken")?,
        };
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        [
            ("zoneId".to_string(), self.zone_id.clone()),
            ("apiToken".to_string(), self.api_token.clone()),
        ]
        .into()
    }

    /// Rejects blank values and zone IDs that could escape the URL path.
    pub fn validate(&self) -> Result<()> {
        if self.zone_id.trim().is_empty() {
            return Err(ZoneError::invalid_argument("zone_id", "cannot be blank"));
        }
        if self.zone_id.contains(['/', '?', '#', ' ']) {
            return Err(ZoneError::invalid_argument(
                "zone_id",
                "cannot contain '/', '?', '#' or spaces",
            ));
        }
        if self.api_token.trim().is_empty() {
            return Err(ZoneError::invalid_argument("api_token", "cannot be blank"));
        }
        Ok(())
    }
}

impl fmt::Debug for ZoneCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneCredentials")
            .field("zone_id", &self.zone_id)
            .field("api_token", &redact_token(&self.api_token))
            .finish()
    }
}

fn required_field(map: &HashMap<String, String>, key: &str) -> Result<String> {
    match map.get(key) {
        None => Err(ZoneError::invalid_argument(key, "is missing")),
        Some(v) if v.trim().is_empty() => Err(ZoneError::invalid_argument(key, "cannot be blank")),
        Some(v) => Ok(v.clone()),
    }
}

/// Settings for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// API base URL without trailing slash.
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: CF_API_BASE.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Rejects zero timeouts and a blank base URL.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ZoneError::invalid_argument("base_url", "cannot be blank"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ZoneError::invalid_argument(
                "connect_timeout_secs",
                "must be at least 1 second",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ZoneError::invalid_argument(
                "request_timeout_secs",
                "must be at least 1 second",
            ));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ZoneError};

/// DNS record kinds accepted by the zone API.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Certificate Authority Authorization record.
    Caa,
    /// Certificate record.
    Cert,
    /// Canonical name (alias) record.
    Cname,
    /// DNSSEC public key record.
    Dnskey,
    /// Delegation signer record.
    Ds,
    /// HTTPS service binding record.
    Https,
    /// Location record.
    Loc,
    /// Mail exchange record.
    Mx,
    /// Naming authority pointer record.
    Naptr,
    /// Name server record.
    Ns,
    /// Pointer record.
    Ptr,
    /// S/MIME certificate association record.
    Smimea,
    /// Service locator record.
    Srv,
    /// SSH key fingerprint record.
    Sshfp,
    /// General service binding record.
    Svcb,
    /// TLS certificate association record.
    Tlsa,
    /// Text record.
    Txt,
    /// Uniform resource identifier record.
    Uri,
}

impl RecordType {
    /// Every record type, in wire-name order.
    pub const ALL: [Self; 20] = [
        Self::A,
        Self::Aaaa,
        Self::Caa,
        Self::Cert,
        Self::Cname,
        Self::Dnskey,
        Self::Ds,
        Self::Https,
        Self::Loc,
        Self::Mx,
        Self::Naptr,
        Self::Ns,
        Self::Ptr,
        Self::Smimea,
        Self::Srv,
        Self::Sshfp,
        Self::Svcb,
        Self::Tlsa,
        Self::Txt,
        Self::Uri,
    ];

    /// Wire name of the type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cert => "CERT",
            Self::Cname => "CNAME",
            Self::Dnskey => "DNSKEY",
            Self::Ds => "DS",
            Self::Https => "HTTPS",
            Self::Loc => "LOC",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Smimea => "SMIMEA",
            Self::Srv => "SRV",
            Self::Sshfp => "SSHFP",
            Self::Svcb => "SVCB",
            Self::Tlsa => "TLSA",
            Self::Txt => "TXT",
            Self::Uri => "URI",
        }
    }

    /// Whether records of this type may be routed through the provider's proxy.
    pub const fn is_proxiable(self) -> bool {
        matches!(self, Self::A | Self::Aaaa | Self::Cname)
    }

    /// Whether [`RecordBuilder`](crate::RecordBuilder) can assemble a payload for this type.
    ///
    /// The remaining types need structured data (priority, weight, port,
    /// algorithm fields) that is not modelled yet.
    pub const fn is_buildable(self) -> bool {
        matches!(
            self,
            Self::A | Self::Aaaa | Self::Cname | Self::Ns | Self::Ptr | Self::Txt
        )
    }

    /// Case-insensitive lookup by wire name.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(ZoneError::InvalidRecordType {
                value: text.to_string(),
            });
        }

        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(text))
            .ok_or_else(|| ZoneError::InvalidRecordType {
                value: text.to_string(),
            })
    }
}

impl FromStr for RecordType {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for every zone client operation.
///
/// Variants follow the order in which a failure can occur: caller input is
/// rejected before any network access, then inbound data, then the transport,
/// then the response envelope, and finally the post-mutation reconciliation.
/// All variants are serializable for structured error reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ZoneError {
    /// A constructor or setter received a blank, malformed or out-of-range value.
    #[error("Invalid argument '{param}': {detail}")]
    InvalidArgument {
        /// Name of the rejected parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Text did not name one of the supported DNS record types.
    #[error("Invalid record type: '{value}'")]
    InvalidRecordType {
        /// The rejected input.
        value: String,
    },

    /// An inbound record payload is missing a field or carries a value of the wrong type.
    #[error("Malformed record: field '{field}' {detail}")]
    MalformedRecord {
        /// Wire name of the offending field.
        field: String,
        /// What is wrong with it.
        detail: String,
    },

    /// The request did not produce a usable HTTP response.
    ///
    /// Covers network errors, timeouts, non-200 status codes, and empty or
    /// unparseable bodies.
    #[error("{}", transport_message(*status, detail))]
    TransportFailure {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Error details.
        detail: String,
    },

    /// The body parsed, but the envelope does not report a successful result.
    #[error("Protocol failure: {detail}")]
    ProtocolFailure {
        /// Which part of the envelope contract was violated.
        detail: String,
    },

    /// The server acknowledged a mutation, but a follow-up read disagrees with it.
    ///
    /// The record is in an unconfirmed state and should be investigated, not retried.
    #[error("Reconciliation failed for record '{record_id}': {detail}")]
    ReconciliationFailure {
        /// ID returned by the mutation.
        record_id: String,
        /// How the fetched state differs.
        detail: String,
    },

    /// An outbound payload could not be encoded.
    #[error("Serialization error: {detail}")]
    SerializationFailure {
        /// Encoder message.
        detail: String,
    },
}

fn transport_message(status: Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("Transport failure (HTTP {code}): {detail}"),
        None => format!("Transport failure: {detail}"),
    }
}

impl ZoneError {
    /// 是否为预期行为（调用方输入错误），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::InvalidRecordType { .. }
        )
    }

    pub(crate) fn invalid_argument(param: &str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn malformed(field: &str, detail: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::TransportFailure {
            status,
            detail: detail.into(),
        }
    }

    pub(crate) fn protocol(detail: impl Into<String>) -> Self {
        Self::ProtocolFailure {
            detail: detail.into(),
        }
    }

    pub(crate) fn reconciliation(record_id: &str, detail: impl Into<String>) -> Self {
        Self::ReconciliationFailure {
            record_id: record_id.to_string(),
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for ZoneError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailure {
            detail: e.to_string(),
        }
    }
}

/// Convenience type alias for `Result<T, ZoneError>`.
pub type Result<T> = std::result::Result<T, ZoneError>;

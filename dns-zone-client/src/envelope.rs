//! Response envelope contract
//!
//! A response is accepted only when it has status 200, a non-blank body that
//! parses as a JSON object, `"success": true`, and a `result` that is a
//! non-empty object or an array. Everything else is rejected; ambiguous
//! responses never count as success.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, ZoneError};
use crate::transport::TransportResponse;
use crate::utils::log_sanitizer::truncate_for_log;

/// Pagination block returned with list results.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct ResultInfo {
    pub total_pages: Option<u32>,
}

/// The accepted parts of a successful response.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub result: Value,
    pub result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<i64>,
    message: Option<String>,
}

/// First entry of the provider's `errors` array, if the body carries one.
fn first_api_error(obj: &Map<String, Value>) -> Option<String> {
    let errors: Vec<ApiError> = serde_json::from_value(obj.get("errors")?.clone()).ok()?;
    let first = errors.into_iter().next()?;
    let message = first.message.unwrap_or_else(|| "unknown error".to_string());
    Some(match first.code {
        Some(code) => format!("[{code}] {message}"),
        None => message,
    })
}

/// Scalars carry no record data and count as empty.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        // 空数组是合法的列表结果（区域内没有记录）
        Value::Array(_) => false,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
    }
}

/// Applies the envelope contract to a raw response.
pub(crate) fn accept(response: TransportResponse) -> Result<Envelope> {
    let TransportResponse { status, body } = response;

    if status != 200 {
        let parsed: Option<Map<String, Value>> = serde_json::from_str(&body).ok();
        let detail = parsed
            .as_ref()
            .and_then(first_api_error)
            .unwrap_or_else(|| truncate_for_log(&body));
        log::error!("API returned HTTP {status}: {detail}");
        return Err(ZoneError::transport(Some(status), detail));
    }

    if body.trim().is_empty() {
        return Err(ZoneError::transport(Some(status), "response body is empty"));
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| {
        log::error!("JSON 解析失败: {e}");
        log::error!("原始响应: {}", truncate_for_log(&body));
        ZoneError::transport(Some(status), format!("response body is not valid JSON: {e}"))
    })?;

    let Value::Object(mut obj) = value else {
        return Err(ZoneError::protocol("response body is not a JSON object"));
    };

    match obj.get("success") {
        None => return Err(ZoneError::protocol("response has no 'success' field")),
        Some(Value::Bool(true)) => {}
        Some(_) => {
            let reason = first_api_error(&obj).unwrap_or_else(|| "no error details".to_string());
            return Err(ZoneError::protocol(format!(
                "response indicates failure: {reason}"
            )));
        }
    }

    let result = match obj.remove("result") {
        None => return Err(ZoneError::protocol("response has no 'result' field")),
        Some(result) if is_empty(&result) => {
            return Err(ZoneError::protocol("response 'result' is empty"));
        }
        Some(result) => result,
    };

    let result_info = obj
        .remove("result_info")
        .and_then(|info| serde_json::from_value(info).ok());

    Ok(Envelope {
        result,
        result_info,
    })
}

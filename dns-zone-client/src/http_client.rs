//! reqwest-backed [`Transport`]
//!
//! Sends the request, logs it, and reads the body back as text. Status codes
//! are not interpreted here; the envelope check in the client decides what a
//! usable response is. Nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::config::HttpConfig;
use crate::error::{Result, ZoneError};
use crate::transport::{HttpMethod, Transport, TransportRequest, TransportResponse};
use crate::utils::log_sanitizer::{redact_token, truncate_for_log};

/// Bearer-token HTTP transport for the zone API.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_token: String,
}

impl HttpTransport {
    pub fn new(api_token: impl Into<String>, config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ZoneError::transport(None, format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn prepare(&self, request: TransportRequest) -> RequestBuilder {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        builder = builder.bearer_auth(&self.api_token);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        builder
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("api_token", &redact_token(&self.api_token))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = request.method;
        let url = self.url(&request.path);
        log::debug!("{method} {url}");
        if let Some(body) = &request.body {
            log::debug!("Request Body: {}", truncate_for_log(body));
        }

        let response = self.prepare(request).send().await.map_err(|e| {
            let detail = if e.is_timeout() {
                format!("request timed out: {e}")
            } else {
                e.to_string()
            };
            log::error!("{method} {url} failed: {detail}");
            ZoneError::transport(None, detail)
        })?;

        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let body = response.text().await.map_err(|e| {
            ZoneError::transport(Some(status), format!("failed to read response body: {e}"))
        })?;

        log::debug!("Response Body: {}", truncate_for_log(&body));

        Ok(TransportResponse { status, body })
    }
}

//! HTTP transport seam.
//!
//! Message operations build an [`HttpRequest`] and hand it to a [`Transport`].
//! The production transport is a blocking reqwest client; tests substitute
//! their own implementation.

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::HeaderMap;
use url::Url;

use crate::error::{Error, Result};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound request, fully built and authenticated.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Response as seen by the validator and decoder.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response with a status and body and no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends a request and returns the response, blocking the calling thread.
pub trait Transport: Send + Sync + fmt::Debug {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Configuration for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout; `None` disables it.
    pub timeout: Option<Duration>,
    /// User agent header value.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: format!("teams-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

/// Blocking transport backed by `reqwest::blocking::Client`.
///
/// Connection pooling is reqwest's; nothing here retries.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport from explicit settings.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(config.user_agent);
        // reqwest's blocking client applies its own 30s default unless told otherwise
        builder = builder.timeout(config.timeout);
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(Error::Http)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().map_err(Error::Http)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Some(DEFAULT_TIMEOUT));
        assert!(config.user_agent.starts_with("teams-client/"));
    }

    #[test]
    fn test_config_builder() {
        let config = TransportConfig::default()
            .with_timeout(None)
            .with_user_agent("custom/1.0");
        assert!(config.timeout.is_none());
        assert_eq!(config.user_agent, "custom/1.0");
        assert!(ReqwestTransport::with_config(config).is_ok());
    }

    #[test]
    fn test_response_new() {
        let response = HttpResponse::new(201, "{}");
        assert_eq!(response.status, 201);
        assert_eq!(response.body, b"{}");
        assert!(response.headers.is_empty());
    }
}

//! Credentials and authenticated request construction.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::{Error, Result};
use crate::transport::HttpRequest;

/// Header carrying the skype token, distinct from `Authorization`.
const AUTHENTICATION: HeaderName = HeaderName::from_static("authentication");

/// Session credentials acquired ahead of time by the caller.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Bearer token for the chat service.
    pub bearer: String,
    /// Skype token, sent alongside the bearer token when present.
    pub skype: Option<String>,
}

impl Credentials {
    /// Credentials with only a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer: token.into(),
            skype: None,
        }
    }

    /// Attach a skype token.
    pub fn with_skype(mut self, token: impl Into<String>) -> Self {
        self.skype = Some(token.into());
        self
    }
}

// Tokens stay out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer", &"<redacted>")
            .field("skype", &self.skype.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Source of credentials for outbound requests.
///
/// Implementations hand back whatever they currently hold; refreshing is the
/// provider's business and never triggered from here.
pub trait TokenProvider: Send + Sync + fmt::Debug {
    fn credentials(&self) -> Result<Credentials>;
}

impl TokenProvider for Credentials {
    fn credentials(&self) -> Result<Credentials> {
        if self.bearer.is_empty() {
            return Err(Error::Auth("bearer token is empty".to_string()));
        }
        Ok(self.clone())
    }
}

/// Builds requests with credentials attached.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    tokens: Arc<dyn TokenProvider>,
}

impl RequestBuilder {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self { tokens }
    }

    /// Build a request for `method` against `url`, with an optional JSON body.
    pub fn build(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> Result<HttpRequest> {
        let url = Url::parse(url)?;
        let credentials = self.tokens.credentials()?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", credentials.bearer))?);
        if let Some(skype) = &credentials.skype {
            headers.insert(AUTHENTICATION, header_value(&format!("skypetoken={}", skype))?);
        }
        if body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| Error::Auth("token is not a valid header value".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

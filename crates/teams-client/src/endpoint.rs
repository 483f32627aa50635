//! Endpoint resolution for the chat service deployment clusters.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Deployment region hosting the tenant's chat service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Emea,
    Amer,
    Apac,
}

impl Region {
    /// Host label used for this region.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Emea => "emea",
            Region::Amer => "amer",
            Region::Apac => "apac",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "emea" => Ok(Region::Emea),
            "amer" => Ok(Region::Amer),
            "apac" => Ok(Region::Apac),
            other => Err(Error::Config(format!("unknown region '{}'", other))),
        }
    }
}

/// Logical endpoint families exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Endpoint {
    /// Conversation and message endpoints (`/users/ME/conversations/...`).
    Messages,
}

/// Builds fully-qualified URLs for an endpoint family plus a path suffix.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    region: Region,
    messages: Url,
}

impl EndpointResolver {
    /// Resolver targeting the public cluster for `region`.
    pub fn for_region(region: Region) -> Result<Self> {
        let messages = Url::parse(&format!(
            "https://{}.ng.msg.teams.microsoft.com/v1",
            region.as_str()
        ))?;
        Ok(Self { region, messages })
    }

    /// Override the base URL of an endpoint family.
    pub fn with_base(mut self, endpoint: Endpoint, base: &str) -> Result<Self> {
        let url = Url::parse(base)?;
        match endpoint {
            Endpoint::Messages => self.messages = url,
        }
        Ok(self)
    }

    /// Region this resolver was created for.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Base URL of an endpoint family.
    pub fn base(&self, endpoint: Endpoint) -> &Url {
        match endpoint {
            Endpoint::Messages => &self.messages,
        }
    }

    /// Resolve `path` against the family's base URL.
    ///
    /// The path may carry its own query string; it is kept, and the returned
    /// URL can still have pairs appended through `query_pairs_mut`.
    pub fn resolve(&self, endpoint: Endpoint, path: &str) -> Result<Url> {
        let base = self.base(endpoint).as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path)).map_err(Error::from)
    }
}

/// Percent-escape a value so it occupies exactly one path segment.
///
/// `""`, `"."` and `".."` are rejected: URL parsing would drop or collapse
/// them (`%2E` counts as a dot too), moving the request to another resource.
pub fn escape_segment(segment: &str) -> Result<Cow<'_, str>> {
    if matches!(segment, "" | "." | "..") {
        return Err(Error::InvalidSegment(segment.to_string()));
    }
    Ok(urlencoding::encode(segment))
}

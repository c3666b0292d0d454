use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::TransportError;

/// Port the API listens on when the page itself is served from an explicit
/// port (a development server).
pub const DEFAULT_API_PORT: u16 = 8000;

/// Location of the page the client runs for: scheme, host and optional port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLocation {
    /// Scheme, with or without the trailing colon (`https:` or `https`)
    pub protocol: String,
    pub hostname: String,
    pub port: Option<u16>,
}

impl Default for PageLocation {
    fn default() -> Self {
        Self {
            protocol: "http:".to_string(),
            hostname: "localhost".to_string(),
            port: None,
        }
    }
}

/// Root of every endpoint URL, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Accepts an explicit `http://` or `https://` base URL.
    pub fn parse(url: &str) -> Result<Self, TransportError> {
        let trimmed = url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| TransportError::InvalidBaseUrl(url.to_string()))?;
        if host.is_empty() {
            return Err(TransportError::InvalidBaseUrl(url.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derives `{protocol}//{hostname}[:{api_port}]/api` from a page location.
    ///
    /// The API port is only added when the page has an explicit port of its
    /// own; otherwise the scheme's default port is used.
    pub fn from_location(location: &PageLocation, api_port: u16) -> Self {
        let protocol = location.protocol.trim_end_matches(':');
        let port = match location.port {
            Some(_) => format!(":{}", api_port),
            None => String::new(),
        };
        Self(format!("{}://{}{}/api", protocol, location.hostname, port))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of `endpoint`: `{base}/{endpoint}/`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}/", self.0, urlencoding::encode(endpoint))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::future::Future;

use super::base_url::BaseUrl;
use super::error::TransportError;

/// Header marking the request as programmatic rather than a page load.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";

/// Bearer token sent as `Authorization: JWT <token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// `None` for an empty token, which is sent as no credential at all.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.is_empty() {
            None
        } else {
            Some(Self::new(token))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> String {
        format!("JWT {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Sends one JSON request and returns the parsed JSON response.
///
/// Implementations must not look up credentials on their own; the caller
/// passes the one to use, or `None`.
pub trait Transport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        body: &Value,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// [`Transport`] over a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        credential: Option<&Credential>,
    ) -> Result<Value, TransportError> {
        let payload = serde_json::to_vec(body).map_err(TransportError::Encode)?;
        let authorization = credential
            .map(Credential::header_value)
            .unwrap_or_default();

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .header(AUTHORIZATION, authorization)
            .body(payload)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "endpoint returned error status");
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| TransportError::InvalidJson {
            url: url.to_string(),
            status: status.as_u16(),
            source,
        })
    }
}

/// Calls named endpoints under a [`BaseUrl`].
#[derive(Debug, Clone)]
pub struct ApiClient<T = HttpTransport> {
    base_url: BaseUrl,
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn new(base_url: BaseUrl) -> Self {
        Self::with_transport(base_url, HttpTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: BaseUrl, transport: T) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POSTs `body` to `{base}/{endpoint}/` and returns the parsed response.
    pub async fn call<B>(
        &self,
        endpoint: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> Result<Value, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(TransportError::Encode)?;
        let url = self.base_url.endpoint_url(endpoint);
        tracing::debug!(%url, authenticated = credential.is_some(), "calling endpoint");
        self.transport.post_json(&url, &body, credential).await
    }
}

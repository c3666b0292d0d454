//! HTTP transport for instructor endpoints.
//!
//! Every command is a `POST {base}/{endpoint}/` carrying a JSON body and
//! three headers:
//!
//! - `Content-Type: application/json`
//! - `X-Requested-With: XMLHttpRequest`
//! - `Authorization: JWT <token>`, or an empty value when no credential is given
//!
//! The response body is parsed as JSON whatever the HTTP status. Nothing is
//! retried and no timeout is applied.

mod base_url;
mod client;
mod error;
mod mock;

pub use base_url::{BaseUrl, PageLocation, DEFAULT_API_PORT};
pub use client::{ApiClient, Credential, HttpTransport, Transport, REQUESTED_WITH_HEADER};
pub use error::TransportError;
pub use mock::{MockTransport, RecordedRequest};

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::client::{Credential, Transport};
use super::error::TransportError;

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub credential: Option<Credential>,
}

/// A transport for testing: records requests and replays queued responses.
///
/// When the queue is empty the call fails as if the server had answered
/// with a non-JSON body.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response for the next call.
    pub fn push_response(&self, response: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MockTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        credential: Option<&Credential>,
    ) -> Result<Value, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                body: body.clone(),
                credential: credential.cloned(),
            });

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(response) => Ok(response),
            None => Err(TransportError::InvalidJson {
                url: url.to_string(),
                status: 200,
                source: empty_body_error(),
            }),
        }
    }
}

fn empty_body_error() -> serde_json::Error {
    serde_json::Error::io(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "no response queued",
    ))
}

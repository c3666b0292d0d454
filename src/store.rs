//! Dispatch glue between the transport and the state engine.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::instruction::Instruction;
use crate::state::{FoldError, ServerState};
use crate::transport::{ApiClient, BaseUrl, Credential, HttpTransport, Transport, TransportError};

/// Errors from [`Store::call_endpoint`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response is JSON but not an instruction envelope.
    #[error("response from endpoint '{endpoint}' is not an instruction: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// An operation in the batch was rejected. Operations before it have
    /// already been committed to the store.
    #[error(transparent)]
    Fold(#[from] FoldError),
}

/// Owns the current [`ServerState`] and updates it from endpoint responses.
///
/// Updates take `&mut self`, so one completes before the next begins.
#[derive(Debug)]
pub struct Store<T = HttpTransport> {
    client: ApiClient<T>,
    credential: Option<Credential>,
    state: ServerState,
}

impl Store<HttpTransport> {
    pub fn new(base_url: BaseUrl) -> Self {
        Self::with_client(ApiClient::new(base_url))
    }
}

impl<T: Transport> Store<T> {
    pub fn with_client(client: ApiClient<T>) -> Self {
        Self {
            client,
            credential: None,
            state: ServerState::new(),
        }
    }

    /// Fallback credential, sent until the server writes a session token
    /// into state.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_state(mut self, state: ServerState) -> Self {
        self.state = state;
        self
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    pub fn into_state(self) -> ServerState {
        self.state
    }

    /// Credential for the next call: the session token the server has
    /// written into state, else the configured one.
    pub fn credential(&self) -> Option<Credential> {
        self.state
            .auth_token()
            .and_then(Credential::from_token)
            .or_else(|| self.credential.clone())
    }

    /// Calls `endpoint` and folds the returned instruction into state.
    ///
    /// Returns the raw response.
    pub async fn call_endpoint<B>(&mut self, endpoint: &str, body: &B) -> Result<Value, DispatchError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(endpoint, body).await?;
        let instruction =
            Instruction::from_value(response.clone()).map_err(|source| DispatchError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })?;
        self.update(&instruction)?;
        Ok(response)
    }

    /// Calls `endpoint` and hands the raw response to `on_success` instead of
    /// touching state.
    pub async fn call_endpoint_with<B, F, R>(
        &self,
        endpoint: &str,
        body: &B,
        on_success: F,
    ) -> Result<R, DispatchError>
    where
        B: Serialize + ?Sized,
        F: FnOnce(Value) -> R,
    {
        let response = self.send(endpoint, body).await?;
        Ok(on_success(response))
    }

    /// Folds the operations of `instruction` into state.
    ///
    /// On failure the state keeps every operation applied before the failing
    /// one.
    pub fn update(&mut self, instruction: &Instruction) -> Result<(), FoldError> {
        if instruction.has_errors() {
            tracing::warn!(errors = ?instruction.errors, "instruction carries errors");
        }
        if let Some(redirect) = instruction.redirect() {
            tracing::info!(redirect, "instruction requests redirect");
        }

        match self.state.apply_all(&instruction.operations) {
            Ok(next) => {
                tracing::debug!(
                    operations = instruction.operations.len(),
                    "server state updated"
                );
                self.state = next;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(index = err.index, error = %err.source, "operation rejected");
                self.state = err.applied.clone();
                Err(err)
            }
        }
    }

    async fn send<B>(&self, endpoint: &str, body: &B) -> Result<Value, TransportError>
    where
        B: Serialize + ?Sized,
    {
        tracing::debug!(endpoint, "callEndpoint");
        let credential = self.credential();
        self.client.call(endpoint, body, credential.as_ref()).await
    }
}

//! `sloto call`: send a command to an endpoint.

use clap::Args;
use serde_json::Value;

use super::{build_store, print_json, CommandError};
use sloto_client::config::Config;
use sloto_client::{Credential, DispatchError};

/// Call an endpoint and show the resulting server state
#[derive(Debug, Args)]
pub struct CallCommand {
    /// Endpoint name, e.g. ListTransactions
    endpoint: String,

    /// JSON request body
    #[arg(long, short, default_value = "{}")]
    body: String,

    /// Credential to send (overrides config)
    #[arg(long)]
    token: Option<String>,

    /// Print the raw response instead of folding it into state
    #[arg(long)]
    raw: bool,
}

impl CallCommand {
    pub async fn run(&self, config: &Config) -> Result<(), CommandError> {
        let body: Value = serde_json::from_str(&self.body)
            .map_err(|e| CommandError::InvalidInput(format!("--body is not JSON: {}", e)))?;
        let mut store = build_store(config, self.credential(config))?;

        if self.raw {
            let response = store
                .call_endpoint_with(&self.endpoint, &body, |response| response)
                .await?;
            return print_json(&response);
        }

        match store.call_endpoint(&self.endpoint, &body).await {
            Ok(_) => print_json(&store.state().to_value()),
            Err(DispatchError::Fold(err)) => {
                // Operations before the failing one are kept; show them.
                print_json(&store.state().to_value())?;
                Err(DispatchError::Fold(err).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// `--token` wins over the config; an empty `--token` sends none.
    fn credential(&self, config: &Config) -> Option<Credential> {
        match &self.token {
            Some(token) => Credential::from_token(token),
            None => config.credential(),
        }
    }
}

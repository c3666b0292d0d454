//! `sloto login`: exchange username and password for a session token.

use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use super::{build_store, CommandError};
use sloto_client::config::Config;
use sloto_client::Instruction;

/// Log in and print the session token
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Account username
    #[arg(long, short)]
    username: String,

    /// Account password (prompted when omitted)
    #[arg(long, short)]
    password: Option<String>,

    /// Endpoint that authenticates users
    #[arg(long, default_value = "AuthenticateUser")]
    endpoint: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl LoginCommand {
    pub async fn run(&self, config: &Config) -> Result<(), CommandError> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => prompt("Password: ")?,
        };

        // The login call itself is unauthenticated.
        let mut store = build_store(config, None)?;
        let response = store
            .call_endpoint(
                &self.endpoint,
                &Credentials {
                    username: &self.username,
                    password: &password,
                },
            )
            .await?;

        let instruction = Instruction::from_value(response)
            .map_err(|e| CommandError::InvalidInput(e.to_string()))?;
        if let Some(errors) = instruction.errors.filter(|errors| !errors.is_null()) {
            return Err(CommandError::Rejected(match errors {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            }));
        }

        match store.state().auth_token() {
            Some(token) => {
                println!("{}", token);
                Ok(())
            }
            None => Err(CommandError::Rejected(
                "server did not return a session token".to_string(),
            )),
        }
    }
}

fn prompt(label: &str) -> Result<String, CommandError> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

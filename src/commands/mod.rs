mod apply;
mod call;
mod config_cmd;
mod login;

pub use apply::ApplyCommand;
pub use call::CallCommand;
pub use config_cmd::ConfigCommand;
pub use login::LoginCommand;

use serde::Serialize;

use sloto_client::config::Config;
use sloto_client::{Credential, DispatchError, FoldError, Store, TransportError};

/// Errors from CLI commands
#[derive(Debug)]
pub enum CommandError {
    Dispatch(DispatchError),
    Fold(FoldError),
    Transport(TransportError),
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidInput(String),
    Rejected(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Dispatch(e) => write!(f, "{}", e),
            CommandError::Fold(e) => write!(f, "{}", e),
            CommandError::Transport(e) => write!(f, "{}", e),
            CommandError::Io(e) => write!(f, "I/O error: {}", e),
            CommandError::Json(e) => write!(f, "JSON error: {}", e),
            CommandError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            CommandError::Rejected(e) => write!(f, "Rejected by server: {}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Dispatch(e) => Some(e),
            CommandError::Fold(e) => Some(e),
            CommandError::Transport(e) => Some(e),
            CommandError::Io(e) => Some(e),
            CommandError::Json(e) => Some(e),
            CommandError::InvalidInput(_) | CommandError::Rejected(_) => None,
        }
    }
}

impl From<DispatchError> for CommandError {
    fn from(e: DispatchError) -> Self {
        CommandError::Dispatch(e)
    }
}

impl From<FoldError> for CommandError {
    fn from(e: FoldError) -> Self {
        CommandError::Fold(e)
    }
}

impl From<TransportError> for CommandError {
    fn from(e: TransportError) -> Self {
        CommandError::Transport(e)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        CommandError::Io(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Json(e)
    }
}

/// Builds a store against the configured base URL.
fn build_store(config: &Config, credential: Option<Credential>) -> Result<Store, CommandError> {
    let store = Store::new(config.base_url()?);
    Ok(match credential {
        Some(credential) => store.with_credential(credential),
        None => store,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

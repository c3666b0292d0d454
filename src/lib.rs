//! Client for instructor-style JSON APIs.
//!
//! Every command is POSTed to a named endpoint; the server answers with an
//! [`Instruction`]: a batch of operations that describe how the
//! client's mirror of server entities should change. [`Store`] sends the
//! command and folds the answer into its [`ServerState`].
//!
//! ```no_run
//! use serde_json::json;
//! use sloto_client::{BaseUrl, Store};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = Store::new(BaseUrl::parse("http://localhost:8000/api")?);
//! store
//!     .call_endpoint("AuthenticateUser", &json!({"username": "u", "password": "p"}))
//!     .await?;
//! store.call_endpoint("ListTransactions", &json!({})).await?;
//! println!("{}", store.state().to_value());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod instruction;
pub mod models;
pub mod state;
pub mod store;
pub mod transport;

pub use instruction::{Instruction, Operation, Verb};
pub use models::{Entity, EntityType, Record, RecordId};
pub use state::{Collection, FoldError, OperationError, ServerState};
pub use store::{DispatchError, Store};
pub use transport::{
    ApiClient, BaseUrl, Credential, HttpTransport, PageLocation, Transport, TransportError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

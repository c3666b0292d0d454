//! Local mirror of server entities and the engine that updates it.
//!
//! A [`ServerState`] maps each entity type to its [`Collection`]. It is never
//! mutated: [`ServerState::apply`] and [`ServerState::apply_all`] return a new
//! snapshot, so readers holding an older one are unaffected.
//!
//! Each wire operation is first converted into a typed [`Change`]:
//!
//! - `OVERWRITE` replaces the collection verbatim
//! - `MERGE` / `MERGE_APPEND` drop records whose id is in the batch, then
//!   append the batch
//! - `MERGE_PREPEND` does the same but puts the batch first
//! - `DELETE` drops records matching the target's id (or each listed id)
//! - `ADD` and unknown verbs are rejected

mod apply;
mod change;
mod error;
mod snapshot;

pub use change::{Change, Placement};
pub use error::{FoldError, OperationError};
pub use snapshot::{Collection, ServerState};

//! State-update error types.

use thiserror::Error;

use super::ServerState;
use crate::instruction::Operation;
use crate::models::EntityType;

/// Why a single operation could not be applied.
///
/// Every variant carries the offending wire operation.
#[derive(Debug, Clone, Error)]
pub enum OperationError {
    /// The verb is not part of the vocabulary.
    #[error("unknown verb in operation {operation}")]
    UnknownVerb { operation: Operation },

    /// The verb is declared but has no defined semantics.
    #[error("unsupported verb in operation {operation}")]
    UnsupportedVerb { operation: Operation },

    /// `target_value` does not have the shape the verb requires.
    #[error("invalid target for operation {operation}: {reason}")]
    InvalidTarget { operation: Operation, reason: String },

    /// The collection holds a plain value, not a list of records.
    #[error("collection {entity_type} does not hold records (operation {operation})")]
    NotRecords {
        entity_type: EntityType,
        operation: Operation,
    },
}

impl OperationError {
    pub fn operation(&self) -> &Operation {
        match self {
            OperationError::UnknownVerb { operation }
            | OperationError::UnsupportedVerb { operation }
            | OperationError::InvalidTarget { operation, .. }
            | OperationError::NotRecords { operation, .. } => operation,
        }
    }
}

/// A batch stopped at `index`.
///
/// `applied` is the snapshot produced by the operations before `index`;
/// those changes are not rolled back.
#[derive(Debug, Clone, Error)]
#[error("operation {index} of batch failed: {source}")]
pub struct FoldError {
    pub index: usize,
    pub applied: ServerState,
    #[source]
    pub source: OperationError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_carries_operation() {
        let operation = Operation::overwrite("Event", json!([]));
        let err = OperationError::UnsupportedVerb {
            operation: operation.clone(),
        };
        assert_eq!(err.operation(), &operation);
        assert_eq!(
            err.to_string(),
            "unsupported verb in operation OVERWRITE Event"
        );
    }

    #[test]
    fn test_fold_error_display() {
        let err = FoldError {
            index: 2,
            applied: ServerState::new(),
            source: OperationError::UnknownVerb {
                operation: Operation::overwrite("Event", json!(null)),
            },
        };
        assert!(err.to_string().starts_with("operation 2 of batch failed"));
    }
}

//! Typed form of a wire [`Operation`].

use serde_json::Value;

use super::error::OperationError;
use super::snapshot::Collection;
use crate::instruction::{Operation, Verb};
use crate::models::{EntityType, Record, RecordId};

/// Where merged records land relative to the untouched ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// A validated change to one collection of the server state.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Replace the collection verbatim.
    Overwrite {
        entity_type: EntityType,
        value: Collection,
    },
    /// Upsert records by id.
    Merge {
        entity_type: EntityType,
        records: Vec<Record>,
        placement: Placement,
    },
    /// Drop every record whose id is listed.
    Delete {
        entity_type: EntityType,
        ids: Vec<RecordId>,
    },
}

impl Change {
    pub fn entity_type(&self) -> &EntityType {
        match self {
            Change::Overwrite { entity_type, .. }
            | Change::Merge { entity_type, .. }
            | Change::Delete { entity_type, .. } => entity_type,
        }
    }
}

impl TryFrom<&Operation> for Change {
    type Error = OperationError;

    fn try_from(operation: &Operation) -> Result<Self, Self::Error> {
        let entity_type = operation.entity_type.clone();
        match &operation.verb {
            Verb::Overwrite => Ok(Change::Overwrite {
                entity_type,
                value: Collection::from(operation.target_value.clone()),
            }),
            Verb::Merge | Verb::MergeAppend => Ok(Change::Merge {
                entity_type,
                records: merge_records(operation)?,
                placement: Placement::Append,
            }),
            Verb::MergePrepend => Ok(Change::Merge {
                entity_type,
                records: merge_records(operation)?,
                placement: Placement::Prepend,
            }),
            Verb::Delete => Ok(Change::Delete {
                entity_type,
                ids: delete_ids(operation)?,
            }),
            // No semantics have been agreed for ADD.
            Verb::Add => Err(OperationError::UnsupportedVerb {
                operation: operation.clone(),
            }),
            Verb::Unknown(_) => Err(OperationError::UnknownVerb {
                operation: operation.clone(),
            }),
        }
    }
}

fn merge_records(operation: &Operation) -> Result<Vec<Record>, OperationError> {
    match &operation.target_value {
        Value::Array(entries) => Ok(entries.iter().cloned().map(Record::from).collect()),
        _ => Err(invalid_target(operation, "expected a list of records")),
    }
}

/// Ids to drop. Ids that can never match (objects, arrays) are skipped.
fn delete_ids(operation: &Operation) -> Result<Vec<RecordId>, OperationError> {
    match &operation.target_value {
        target @ Value::Object(_) => Ok(RecordId::of(target).into_iter().collect()),
        Value::Array(entries) => Ok(entries.iter().filter_map(RecordId::of).collect()),
        _ => Err(invalid_target(
            operation,
            "expected a record or a list of records",
        )),
    }
}

fn invalid_target(operation: &Operation, reason: &str) -> OperationError {
    OperationError::InvalidTarget {
        operation: operation.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(verb: &str, target_value: Value) -> Operation {
        Operation::new(verb.to_string().into(), "Transaction", target_value)
    }

    #[test]
    fn test_merge_aliases_append() {
        for verb in ["MERGE", "MERGE_APPEND"] {
            let change = Change::try_from(&op(verb, json!([{"id": 1}]))).unwrap();
            assert!(matches!(
                change,
                Change::Merge {
                    placement: Placement::Append,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_merge_prepend() {
        let change = Change::try_from(&op("MERGE_PREPEND", json!([]))).unwrap();
        assert!(matches!(
            change,
            Change::Merge {
                placement: Placement::Prepend,
                ..
            }
        ));
    }

    #[test]
    fn test_merge_requires_list() {
        let err = Change::try_from(&op("MERGE", json!({"id": 1}))).unwrap_err();
        assert!(matches!(err, OperationError::InvalidTarget { .. }));

        let err = Change::try_from(&op("MERGE_PREPEND", json!(null))).unwrap_err();
        assert!(matches!(err, OperationError::InvalidTarget { .. }));
    }

    #[test]
    fn test_merge_accepts_entries_of_any_shape() {
        let change = Change::try_from(&op("MERGE", json!([1, "x", {"id": 2.5}]))).unwrap();
        match change {
            Change::Merge { records, .. } => {
                let values: Vec<&Value> = records.iter().map(Record::as_value).collect();
                assert_eq!(values, vec![&json!(1), &json!("x"), &json!({"id": 2.5})]);
            }
            other => panic!("unexpected change: {other:?}"),
        }
    }

    #[test]
    fn test_delete_single_and_list() {
        let change = Change::try_from(&op("DELETE", json!({"id": 1}))).unwrap();
        assert_eq!(
            change,
            Change::Delete {
                entity_type: "Transaction".into(),
                ids: vec![RecordId::Int(1)],
            }
        );

        let change = Change::try_from(&op(
            "DELETE",
            json!([{"id": 1}, {"id": "x"}, 5, {"id": {"nested": 1}}]),
        ))
        .unwrap();
        assert_eq!(
            change,
            Change::Delete {
                entity_type: "Transaction".into(),
                ids: vec![RecordId::Int(1), RecordId::from("x"), RecordId::Absent],
            }
        );
    }

    #[test]
    fn test_delete_rejects_scalar() {
        for target in [json!(1), json!("x"), json!(null)] {
            let err = Change::try_from(&op("DELETE", target)).unwrap_err();
            assert!(matches!(err, OperationError::InvalidTarget { .. }));
        }
    }

    #[test]
    fn test_add_is_unsupported() {
        let operation = op("ADD", json!([{"id": 1}]));
        let err = Change::try_from(&operation).unwrap_err();
        assert!(matches!(err, OperationError::UnsupportedVerb { .. }));
        assert_eq!(err.operation(), &operation);
    }

    #[test]
    fn test_unknown_verb() {
        let err = Change::try_from(&op("REPLACE", json!([]))).unwrap_err();
        assert!(matches!(err, OperationError::UnknownVerb { .. }));
    }

    #[test]
    fn test_overwrite_accepts_any_value() {
        let change = Change::try_from(&op("OVERWRITE", json!("token"))).unwrap();
        assert_eq!(
            change,
            Change::Overwrite {
                entity_type: "Transaction".into(),
                value: Collection::Value(json!("token")),
            }
        );
        assert_eq!(change.entity_type().as_str(), "Transaction");
    }
}

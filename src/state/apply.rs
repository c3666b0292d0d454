//! Folding operations into a [`ServerState`].

use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use super::change::{Change, Placement};
use super::error::{FoldError, OperationError};
use super::snapshot::{Collection, ServerState};
use crate::instruction::Operation;
use crate::models::{EntityType, Record, RecordId};

impl ServerState {
    /// Applies one wire operation, returning the next snapshot.
    pub fn apply(&self, operation: &Operation) -> Result<ServerState, OperationError> {
        let change = Change::try_from(operation)?;
        self.apply_change(change, operation)
    }

    /// Applies `operations` left to right.
    ///
    /// Stops at the first operation that fails. The error keeps the snapshot
    /// reached so far.
    pub fn apply_all(&self, operations: &[Operation]) -> Result<ServerState, FoldError> {
        operations
            .iter()
            .enumerate()
            .try_fold(self.clone(), |state, (index, operation)| {
                match state.apply(operation) {
                    Ok(next) => {
                        tracing::trace!(index, %operation, "applied operation");
                        Ok(next)
                    }
                    Err(source) => Err(FoldError {
                        index,
                        applied: state,
                        source,
                    }),
                }
            })
    }

    fn apply_change(&self, change: Change, operation: &Operation) -> Result<ServerState, OperationError> {
        let entity_type = change.entity_type().clone();
        let collection = match change {
            Change::Overwrite { value, .. } => value,
            Change::Merge {
                records, placement, ..
            } => {
                let existing = self.existing_records(&entity_type, operation)?;
                Collection::Records(merge(existing, records, placement))
            }
            Change::Delete { ids, .. } => {
                let existing = self.existing_records(&entity_type, operation)?;
                let ids: HashSet<RecordId> = ids.into_iter().collect();
                Collection::Records(
                    existing
                        .into_iter()
                        .filter(|record| !has_listed_id(record, &ids))
                        .collect(),
                )
            }
        };

        let mut collections = self.collections.clone();
        collections.insert(entity_type, Arc::new(collection));
        Ok(ServerState { collections })
    }

    /// Current records of `entity_type`; a missing or null bucket is empty.
    /// Any other non-list bucket cannot hold records.
    fn existing_records(
        &self,
        entity_type: &EntityType,
        operation: &Operation,
    ) -> Result<Vec<Record>, OperationError> {
        let not_records = || OperationError::NotRecords {
            entity_type: entity_type.clone(),
            operation: operation.clone(),
        };
        match self.get(entity_type.as_str()) {
            None | Some(Collection::Value(Value::Null)) => Ok(Vec::new()),
            Some(Collection::Records(records)) => Ok(records.clone()),
            Some(Collection::Value(Value::Array(entries))) => {
                Ok(entries.iter().cloned().map(Record::from).collect())
            }
            Some(Collection::Value(_)) => Err(not_records()),
        }
    }
}

fn has_listed_id(record: &Record, ids: &HashSet<RecordId>) -> bool {
    record.id().is_some_and(|id| ids.contains(&id))
}

fn merge(existing: Vec<Record>, incoming: Vec<Record>, placement: Placement) -> Vec<Record> {
    let replaced: HashSet<RecordId> = incoming.iter().filter_map(Record::id).collect();
    let kept = existing
        .into_iter()
        .filter(|record| !has_listed_id(record, &replaced));

    match placement {
        Placement::Append => {
            let mut merged: Vec<Record> = kept.collect();
            merged.extend(incoming.iter().cloned());
            merged
        }
        Placement::Prepend => {
            let mut merged = incoming.clone();
            merged.extend(kept);
            merged
        }
    }
}

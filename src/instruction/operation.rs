use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::models::{EntityType, Record};

/// Verb of a wire operation.
///
/// Unrecognized verbs are kept verbatim in [`Verb::Unknown`] so that the
/// operation can be reported back to the caller when it is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verb {
    Merge,
    MergeAppend,
    MergePrepend,
    Add,
    Overwrite,
    Delete,
    Unknown(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Merge => "MERGE",
            Verb::MergeAppend => "MERGE_APPEND",
            Verb::MergePrepend => "MERGE_PREPEND",
            Verb::Add => "ADD",
            Verb::Overwrite => "OVERWRITE",
            Verb::Delete => "DELETE",
            Verb::Unknown(verb) => verb,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "MERGE" => Verb::Merge,
            "MERGE_APPEND" => Verb::MergeAppend,
            "MERGE_PREPEND" => Verb::MergePrepend,
            "ADD" => Verb::Add,
            "OVERWRITE" => Verb::Overwrite,
            "DELETE" => Verb::Delete,
            other => Verb::Unknown(other.to_string()),
        })
    }
}

impl From<String> for Verb {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(verb) => verb,
            Err(never) => match never {},
        }
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Unknown(verb) => verb,
            known => known.as_str().to_string(),
        }
    }
}

/// One change to apply to an entity-type collection, as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub verb: Verb,
    pub entity_type: EntityType,
    pub target_value: Value,
}

impl Operation {
    pub fn new(verb: Verb, entity_type: impl Into<EntityType>, target_value: Value) -> Self {
        Self {
            verb,
            entity_type: entity_type.into(),
            target_value,
        }
    }

    /// Upserts `records` by id, appending them after the untouched records.
    pub fn merge(entity_type: impl Into<EntityType>, records: Vec<Record>) -> Self {
        Self::new(Verb::Merge, entity_type, records_value(records))
    }

    /// Upserts `records` by id, placing them before the untouched records.
    pub fn merge_prepend(entity_type: impl Into<EntityType>, records: Vec<Record>) -> Self {
        Self::new(Verb::MergePrepend, entity_type, records_value(records))
    }

    /// Replaces the whole collection with `value`.
    pub fn overwrite(entity_type: impl Into<EntityType>, value: impl Into<Value>) -> Self {
        Self::new(Verb::Overwrite, entity_type, value.into())
    }

    /// Removes the record sharing `target`'s id.
    pub fn delete(entity_type: impl Into<EntityType>, target: Record) -> Self {
        Self::new(Verb::Delete, entity_type, target.into())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.entity_type)
    }
}

fn records_value(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::from).collect())
}

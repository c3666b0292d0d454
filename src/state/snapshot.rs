use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{Entity, EntityType, Record};

/// Contents of one entity-type bucket.
///
/// Every JSON array is a record list; its entries are kept verbatim. Any
/// other value, such as the session token string an `OVERWRITE` stores, is
/// kept as a plain value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Collection {
    Records(Vec<Record>),
    Value(Value),
}

impl Collection {
    pub fn to_value(&self) -> Value {
        match self {
            Collection::Records(records) => {
                Value::Array(records.iter().map(|record| record.as_value().clone()).collect())
            }
            Collection::Value(value) => value.clone(),
        }
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Collection::Records(records) => Some(records),
            Collection::Value(_) => None,
        }
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(entries) => {
                Collection::Records(entries.into_iter().map(Record::from).collect())
            }
            other => Collection::Value(other),
        }
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Records(records) => {
                Value::Array(records.into_iter().map(Value::from).collect())
            }
            Collection::Value(value) => value,
        }
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Collection::Records(records)
    }
}

/// Immutable snapshot of every server-mirrored collection.
///
/// Updates return a new snapshot; collections that an update does not touch
/// are shared with the previous one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerState {
    pub(super) collections: BTreeMap<EntityType, Arc<Collection>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot with `entity_type` replaced by `collection`.
    pub fn with(&self, entity_type: impl Into<EntityType>, collection: impl Into<Collection>) -> Self {
        let mut collections = self.collections.clone();
        collections.insert(entity_type.into(), Arc::new(collection.into()));
        Self { collections }
    }

    pub fn get(&self, entity_type: &str) -> Option<&Collection> {
        self.collections.get(entity_type).map(Arc::as_ref)
    }

    /// Records of `entity_type`; empty when the bucket is missing or holds a
    /// plain value.
    pub fn records(&self, entity_type: &str) -> &[Record] {
        self.get(entity_type)
            .and_then(Collection::as_records)
            .unwrap_or(&[])
    }

    /// Decodes the bucket of `T` into its typed records.
    pub fn entities<T: Entity>(&self) -> Result<Vec<T>, serde_json::Error> {
        match self.get(T::ENTITY_TYPE) {
            Some(collection) => serde_json::from_value(collection.to_value()),
            None => Ok(Vec::new()),
        }
    }

    /// Session token handed out by the server, if one has been received.
    pub fn auth_token(&self) -> Option<&str> {
        match self.get(EntityType::JWT_AUTH_TOKEN) {
            Some(Collection::Value(Value::String(token))) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.collections.keys()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            self.collections
                .iter()
                .map(|(entity_type, collection)| (entity_type.to_string(), collection.to_value()))
                .collect(),
        )
    }

    /// Builds a snapshot from a JSON object of `entity_type -> collection`.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

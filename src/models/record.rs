use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Comparable form of a record's `id` field.
///
/// Numbers compare by value, so `1` and `1.0` are the same id. A missing id
/// and a `null` id are distinct, and each only matches itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Absent,
    Null,
    Bool(bool),
    Int(i128),
    /// Bit pattern of a number with a fractional part.
    Float(u64),
    Text(String),
}

impl RecordId {
    /// Id of a collection entry.
    ///
    /// Entries that are not objects have an absent id. Returns `None` when
    /// the id is an object or array, which never matches another id.
    pub fn of(entry: &Value) -> Option<Self> {
        match entry.get("id") {
            None => Some(RecordId::Absent),
            Some(Value::Null) => Some(RecordId::Null),
            Some(Value::Bool(flag)) => Some(RecordId::Bool(*flag)),
            Some(Value::Number(number)) => Some(number_id(number)),
            Some(Value::String(text)) => Some(RecordId::Text(text.clone())),
            Some(Value::Array(_) | Value::Object(_)) => None,
        }
    }
}

fn number_id(number: &Number) -> RecordId {
    if let Some(id) = number.as_i64() {
        return RecordId::Int(i128::from(id));
    }
    if let Some(id) = number.as_u64() {
        return RecordId::Int(i128::from(id));
    }
    let id = number.as_f64().unwrap_or_default();
    if id.fract() == 0.0 && id.abs() < 1e38 {
        RecordId::Int(id as i128)
    } else {
        RecordId::Float(id.to_bits())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(i128::from(id))
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// One entry of a record collection, kept exactly as the server sent it.
///
/// Entries are normally JSON objects keyed by `id`, but nothing is
/// validated: an entry of any shape is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(id: impl Into<Value>) -> Self {
        let mut object = Map::new();
        object.insert("id".to_string(), id.into());
        Self(Value::Object(object))
    }

    /// Adds a field, builder style. Does nothing on a non-object entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Object(object) = &mut self.0 {
            object.insert(key.into(), value.into());
        }
        self
    }

    /// See [`RecordId::of`].
    pub fn id(&self) -> Option<RecordId> {
        RecordId::of(&self.0)
    }

    /// Returns true if this record carries the same id as `other`.
    pub fn same_id(&self, other: &Record) -> bool {
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(entry: Value) -> Option<RecordId> {
        Record::from(entry).id()
    }

    #[test]
    fn test_record_from_json() {
        let record: Record = serde_json::from_value(json!({"id": 7, "amt": 5})).unwrap();
        assert_eq!(record.id(), Some(RecordId::Int(7)));
        assert_eq!(record.get("amt"), Some(&json!(5)));
        assert_eq!(record.as_value(), &json!({"id": 7, "amt": 5}));
    }

    #[test]
    fn test_record_string_id() {
        assert_eq!(id(json!({"id": "evt-1"})), Some(RecordId::from("evt-1")));
        assert_ne!(id(json!({"id": "1"})), id(json!({"id": 1})));
    }

    #[test]
    fn test_missing_and_null_ids_are_distinct() {
        let a = Record::from(json!({"name": "a"}));
        let b = Record::from(json!({"name": "b"}));
        let c = Record::from(json!({"id": null}));
        assert_eq!(a.id(), Some(RecordId::Absent));
        assert!(a.same_id(&b));
        assert!(!a.same_id(&c));
        assert!(c.same_id(&Record::from(json!({"id": null, "v": 1}))));
    }

    #[test]
    fn test_numeric_ids_compare_by_value() {
        assert_eq!(id(json!({"id": 1})), id(json!({"id": 1.0})));
        assert_eq!(id(json!({"id": 1.5})), id(json!({"id": 1.5})));
        assert_ne!(id(json!({"id": 1.5})), id(json!({"id": 2.5})));
        assert_eq!(
            id(json!({"id": 18446744073709551615u64})),
            Some(RecordId::Int(18446744073709551615))
        );
        assert_eq!(id(json!({"id": -3})), Some(RecordId::from(-3)));
    }

    #[test]
    fn test_composite_ids_never_match() {
        let a = Record::from(json!({"id": {"k": 1}}));
        assert_eq!(a.id(), None);
        assert!(!a.same_id(&a.clone()));
        assert_eq!(id(json!({"id": [1]})), None);
    }

    #[test]
    fn test_non_object_entries_are_kept() {
        let record: Record = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(record.id(), Some(RecordId::Absent));
        assert_eq!(Value::from(record.with("ignored", 1)), json!(3));
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new(1).with("amt", 5);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"id": 1, "amt": 5}));
        assert_eq!(Value::from(record), json!({"id": 1, "amt": 5}));
    }
}

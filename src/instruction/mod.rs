//! Wire types returned by an instructor endpoint.
//!
//! An endpoint answers every command with an [`Instruction`]: an ordered
//! batch of [`Operation`]s to fold into the local server state, plus an
//! optional error payload and redirect target.
//!
//! ```json
//! {
//!   "operations": [
//!     {"verb": "MERGE", "entity_type": "Transaction", "target_value": [{"id": 1}]}
//!   ],
//!   "errors": null,
//!   "redirect": ""
//! }
//! ```

mod operation;

pub use operation::{Operation, Verb};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope of an instructor endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub errors: Option<Value>,
    #[serde(default)]
    pub redirect: String,
}

impl Instruction {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            operations,
            ..Self::default()
        }
    }

    /// An instruction that changes nothing and reports `errors`.
    pub fn with_errors(errors: impl Into<Value>) -> Self {
        Self {
            errors: Some(errors.into()),
            ..Self::default()
        }
    }

    /// Decodes a raw endpoint response.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn has_errors(&self) -> bool {
        matches!(&self.errors, Some(errors) if !errors.is_null())
    }

    /// Redirect target, if the server asked for one.
    pub fn redirect(&self) -> Option<&str> {
        if self.redirect.is_empty() {
            None
        } else {
            Some(&self.redirect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instruction_serialize() {
        let instruction = Instruction::new(vec![Operation::overwrite(
            "jwt_auth_token",
            json!([{"username": "user", "password": "pass"}]),
        )]);

        assert_eq!(
            serde_json::to_value(&instruction).unwrap(),
            json!({
                "errors": null,
                "redirect": "",
                "operations": [{
                    "verb": "OVERWRITE",
                    "entity_type": "jwt_auth_token",
                    "target_value": [{"username": "user", "password": "pass"}]
                }]
            })
        );
    }

    #[test]
    fn test_instruction_defaults_missing_fields() {
        let instruction = Instruction::from_value(json!({})).unwrap();
        assert!(instruction.operations.is_empty());
        assert!(!instruction.has_errors());
        assert_eq!(instruction.redirect(), None);
    }

    #[test]
    fn test_instruction_errors_and_redirect() {
        let instruction = Instruction::from_value(json!({
            "operations": [],
            "errors": "bad credential",
            "redirect": "/login"
        }))
        .unwrap();
        assert!(instruction.has_errors());
        assert_eq!(instruction.redirect(), Some("/login"));

        assert!(Instruction::with_errors("nope").has_errors());
    }

    #[test]
    fn test_instruction_rejects_non_list_operations() {
        assert!(Instruction::from_value(json!({"operations": "MERGE"})).is_err());
        assert!(Instruction::from_value(json!("ok")).is_err());
    }
}

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a collection bucket in the server state, e.g. `Transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Entity type under which the server hands out the session token.
    pub const JWT_AUTH_TOKEN: &'static str = "jwt_auth_token";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A typed view over the records of one entity type.
///
/// Implement this for an application record struct to read its collection
/// out of a [`ServerState`](crate::state::ServerState) with a checked shape.
pub trait Entity: DeserializeOwned {
    const ENTITY_TYPE: &'static str;

    fn entity_type() -> EntityType {
        EntityType::from(Self::ENTITY_TYPE)
    }
}

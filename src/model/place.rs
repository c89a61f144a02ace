use serde::{Deserialize, Serialize};
use std::fmt;

/// The name that distinguishes "the place currently on screen".
///
/// The Japanese-script name is preferred when the page shows one, otherwise the
/// Latin display name is used. Identities are compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceIdentity(String);

impl PlaceIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a result carrying `name` belongs to this identity.
    pub fn matches(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for PlaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload of a lookup dispatched by the presentation context.
///
/// Fire-and-forget: the answer is correlated only by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub name: String,
    pub phone: Option<String>,
}

impl LookupRequest {
    pub fn new(name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            name: name.into(),
            phone,
        }
    }
}

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier.
///
/// The API sends Mongo-style string ids under `_id` and numeric ids under
/// `id`; both decode to the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Create an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// Reference to another record: a bare id or an object carrying one.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum RawRef {
    Bare(Id),
    Object {
        #[serde(rename = "_id", default)]
        underscore: Option<Id>,
        #[serde(default)]
        id: Option<Id>,
    },
}

impl RawRef {
    pub(super) fn into_id(self) -> Option<Id> {
        match self {
            Self::Bare(id) => Some(id),
            Self::Object { underscore, id } => underscore.or(id),
        }
    }
}

/// Resolve a record id from `_id`, falling back to `id`.
pub(super) fn resolve_id(
    underscore: Option<Id>,
    id: Option<Id>,
    record: &str,
) -> Result<Id, String> {
    underscore
        .or(id)
        .ok_or_else(|| format!("{record} is missing '_id'"))
}

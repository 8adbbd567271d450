use std::fmt;
use std::str::FromStr;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier assigned by the document store when a document is inserted.
///
/// Rendered externally as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Mint a fresh, time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocumentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for DocumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CoreError::MalformedId(format!("'{s}' is not a valid document id")))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A document together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub id: DocumentId,
    pub document: T,
}

/// Render a timestamp as an ISO-8601 string with microsecond precision.
pub fn iso8601(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time, never earlier than `previous`.
///
/// Keeps `updatedAt` from moving backwards if the wall clock steps back
/// between two writes.
pub fn now_not_before(previous: Option<Timestamp>) -> Timestamp {
    let now = chrono::Utc::now();
    match previous {
        Some(prev) if prev > now => prev,
        _ => now,
    }
}

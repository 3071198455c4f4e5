//! Transaction ID type definition.
//!
//! IDs are opaque strings on the wire. IDs assigned by SQLite are plain integers,
//! while IDs assigned by the in-memory store carry the [IN_MEMORY_ID_PREFIX] so the
//! two kinds can never be confused.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The prefix that marks an ID as belonging to the in-memory store.
pub const IN_MEMORY_ID_PREFIX: &str = "mem_";

/// Identifies a stored transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionId {
    /// A row ID assigned by the SQLite database.
    Database(DatabaseId),
    /// A sequence number assigned by the in-memory store.
    InMemory(u64),
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionId::Database(id) => write!(f, "{id}"),
            TransactionId::InMemory(id) => write!(f, "{IN_MEMORY_ID_PREFIX}{id}"),
        }
    }
}

/// The error returned when a string is not a transaction ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid transaction ID")]
pub struct ParseTransactionIdError(String);

impl FromStr for TransactionId {
    type Err = ParseTransactionIdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let parsed = match text.strip_prefix(IN_MEMORY_ID_PREFIX) {
            Some(sequence_number) => sequence_number.parse().map(TransactionId::InMemory).ok(),
            None => text.parse().map(TransactionId::Database).ok(),
        };

        parsed.ok_or_else(|| ParseTransactionIdError(text.to_owned()))
    }
}

impl Serialize for TransactionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

use std::fmt;

use crate::modules::content::domain::entities::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchAll,
    FetchOne,
    Upsert,
    Remove,
    ReplaceAll,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchAll => "fetch_all",
            Operation::FetchOne => "fetch_one",
            Operation::Upsert => "upsert",
            Operation::Remove => "remove",
            Operation::ReplaceAll => "replace_all",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceFailure {
    #[error("database error: {0}")]
    Database(String),

    /// A stored value could not be mapped to or from its entity.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Every gateway failure carries the operation and entity kind it came from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} {entity}: {failure}")]
pub struct PersistenceError {
    pub operation: Operation,
    pub entity: EntityKind,
    pub failure: PersistenceFailure,
}

impl PersistenceError {
    pub fn database(operation: Operation, entity: EntityKind, err: impl fmt::Display) -> Self {
        Self {
            operation,
            entity,
            failure: PersistenceFailure::Database(err.to_string()),
        }
    }

    pub fn serialization(operation: Operation, entity: EntityKind, err: impl fmt::Display) -> Self {
        Self {
            operation,
            entity,
            failure: PersistenceFailure::Serialization(err.to_string()),
        }
    }
}

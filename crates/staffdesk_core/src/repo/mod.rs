//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for employees and reviews.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Write paths validate fields before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod employee_repo;
pub mod review_repo;

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { table: &'static str, id: i64 },
    /// The operation needs a stored row but the record has no id.
    Unsaved,
    /// Another in-memory instance already stands for this id.
    IdentityConflict(i64),
    /// A caller holds a borrow of the cached review with this id.
    HandleBorrowed(i64),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row with id {id} in {table}"),
            Self::Unsaved => write!(f, "record has not been saved yet"),
            Self::IdentityConflict(id) => {
                write!(f, "review {id} is already held by another instance")
            }
            Self::HandleBorrowed(id) => write!(f, "review {id} is still borrowed"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::Unsaved
            | Self::IdentityConflict(_)
            | Self::HandleBorrowed(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

//! On-disk persistence of the directory aggregate.
//!
//! # Responsibility
//! - Convert the aggregate to and from a flat JSON document.
//! - Validate every stored record with the same predicates command parsing
//!   uses before any entity is constructed.
//!
//! # Invariants
//! - Loading is all-or-nothing: one bad record fails the whole document.
//! - Saving fully replaces the prior document or leaves it untouched.

use crate::model::unique_list::DirectoryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_storage;
pub mod record;

pub use json_storage::JsonDirectoryStorage;
pub use record::{DirectoryDocument, RecordError};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing the data file.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A stored record failed field validation.
    InvalidRecord(RecordError),
    /// Stored collections violate identity uniqueness.
    DuplicateEntries(DirectoryError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "data file io error: {err}"),
            Self::Json(err) => write!(f, "data file is not valid JSON: {err}"),
            Self::InvalidRecord(err) => write!(f, "{err}"),
            Self::DuplicateEntries(_) => {
                write!(f, "Stored data contains duplicate persons")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidRecord(err) => Some(err),
            Self::DuplicateEntries(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RecordError> for StorageError {
    fn from(value: RecordError) -> Self {
        Self::InvalidRecord(value)
    }
}

impl From<DirectoryError> for StorageError {
    fn from(value: DirectoryError) -> Self {
        Self::DuplicateEntries(value)
    }
}

impl StorageError {
    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "storage_io",
            Self::Json(_) => "storage_json",
            Self::InvalidRecord(_) => "invalid_record",
            Self::DuplicateEntries(_) => "duplicate_entries",
        }
    }
}

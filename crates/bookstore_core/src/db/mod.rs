//! SQLite storage bootstrap and catalogue seeding entry points.
//!
//! # Responsibility
//! - Open and configure the SQLite connection backing the catalogue.
//! - Create the `ebookstore` table and seed it exactly once.
//!
//! # Invariants
//! - The table is created only when absent; an existing table is never
//!   reseeded or altered.
//! - Core code must not read/write catalogue rows before bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod seed;

pub use open::{open_db, open_db_in_memory};
pub use seed::{
    ensure_catalogue, ensure_catalogue_with, seed_books, seed_catalogue, SeedStatus,
    CATALOGUE_TABLE,
};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Backing storage could not be opened or created. Fatal at startup.
    StorageUnavailable {
        location: PathBuf,
        source: rusqlite::Error,
    },
    /// Seeding found conflicting identifiers.
    IntegrityViolation(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::StorageUnavailable { location, source } => write!(
                f,
                "catalogue storage unavailable at `{}`: {source}",
                location.display()
            ),
            Self::IntegrityViolation(message) => {
                write!(f, "duplicate unique ids registered: {message}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::StorageUnavailable { source, .. } => Some(source),
            Self::IntegrityViolation(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Returns whether `err` is a SQLite uniqueness/primary key violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => matches!(
            failure.extended_code,
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        ),
        _ => false,
    }
}

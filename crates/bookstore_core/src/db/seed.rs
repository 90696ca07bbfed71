//! Catalogue table creation and one-time seeding.
//!
//! # Responsibility
//! - Create the `ebookstore` table on first run.
//! - Insert the canonical seed records in one all-or-nothing unit.
//!
//! # Invariants
//! - Table creation is committed before seeding starts, so a failed seed
//!   leaves an empty table that is never reseeded.
//! - Seeding never runs against a pre-existing table.

use crate::db::{is_unique_violation, DbError, DbResult};
use crate::model::book::BookRecord;
use log::{info, warn};
use rusqlite::{params, Connection};

/// Name of the single catalogue table.
pub const CATALOGUE_TABLE: &str = "ebookstore";

const CREATE_TABLE_SQL: &str = include_str!("schema.sql");

/// Outcome of the first-run bootstrap performed by `open_db`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedStatus {
    /// Table was absent; it was created and `count` seed rows inserted.
    Seeded { count: usize },
    /// Table already existed; nothing was written.
    AlreadyPresent,
    /// Table was created but seeding hit an integrity violation and was
    /// rolled back.
    Aborted { reason: String },
}

impl SeedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seeded { .. } => "seeded",
            Self::AlreadyPresent => "already_present",
            Self::Aborted { .. } => "aborted",
        }
    }
}

/// Returns the five canonical records inserted on first run.
pub fn seed_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(3001, "A Tale of Two Cities", "Charles Dickens", 30),
        BookRecord::new(
            3002,
            "Harry Potter and the Philosopher's Stone",
            "J.K Rowling",
            40,
        ),
        BookRecord::new(3003, "The Lion, the Witch and the Wardrobe", "C.S Lewis", 25),
        BookRecord::new(3004, "The Lord of the Rings", "J.R.R Tolkien", 37),
        BookRecord::new(3005, "Alice in Wonderland", "Lewis Carrol", 12),
    ]
}

/// Creates and seeds the catalogue table if it does not exist yet.
pub fn ensure_catalogue(conn: &mut Connection) -> DbResult<SeedStatus> {
    ensure_catalogue_with(conn, &seed_books())
}

/// Same as [`ensure_catalogue`] with caller-provided seed rows.
///
/// An integrity violation while seeding is reported as
/// `SeedStatus::Aborted`; any other SQLite failure is returned as an error.
pub fn ensure_catalogue_with(conn: &mut Connection, books: &[BookRecord]) -> DbResult<SeedStatus> {
    if table_exists(conn, CATALOGUE_TABLE)? {
        info!("event=catalogue_seed module=db status=skipped reason=table_exists");
        return Ok(SeedStatus::AlreadyPresent);
    }

    conn.execute_batch(CREATE_TABLE_SQL)?;

    match seed_catalogue(conn, books) {
        Ok(count) => {
            info!("event=catalogue_seed module=db status=ok rows={count}");
            Ok(SeedStatus::Seeded { count })
        }
        Err(DbError::IntegrityViolation(reason)) => {
            warn!(
                "event=catalogue_seed module=db status=error error_code=integrity_violation error={reason}"
            );
            Ok(SeedStatus::Aborted { reason })
        }
        Err(err) => Err(err),
    }
}

/// Inserts `books` into the catalogue table in a single transaction.
///
/// # Errors
/// - `DbError::IntegrityViolation` when two rows share an id, or a row
///   collides with an existing one. Nothing is written in that case.
pub fn seed_catalogue(conn: &mut Connection, books: &[BookRecord]) -> DbResult<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO ebookstore (id, title, author, qty) VALUES (?1, ?2, ?3, ?4);")?;
        for book in books {
            stmt.execute(params![book.id, book.title, book.author, book.quantity])
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        DbError::IntegrityViolation(format!("id {} is already registered", book.id))
                    } else {
                        DbError::Sqlite(err)
                    }
                })?;
        }
    }
    tx.commit()?;
    Ok(books.len())
}

fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

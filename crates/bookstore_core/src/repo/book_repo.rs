//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the Store primitives over the `ebookstore` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Rows are returned in storage (rowid) order; no field sort is implied.
//! - Text filters are exact, case-sensitive matches.
//! - Duplicate ids on insert surface as `RepoError::DuplicateKey`.

use crate::db::{is_unique_violation, DbError, CATALOGUE_TABLE};
use crate::model::book::{BookId, BookRecord, BookValidationError};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    qty
FROM ebookstore";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalogue persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    /// Insert attempted with an id that is already present.
    DuplicateKey(BookId),
    /// Connection was not bootstrapped with the catalogue table.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateKey(id) => write!(f, "book id already in use: {id}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateKey(_) => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
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

/// Single-column equality filter for [`BookRepository::query_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFilter<'a> {
    Id(BookId),
    Title(&'a str),
    Author(&'a str),
    Quantity(i64),
}

impl BookFilter<'_> {
    fn column(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Title(_) => "title",
            Self::Author(_) => "author",
            Self::Quantity(_) => "qty",
        }
    }

    fn bind_value(&self) -> Value {
        match self {
            Self::Id(id) => Value::Integer(*id),
            Self::Title(text) | Self::Author(text) => Value::Text((*text).to_string()),
            Self::Quantity(quantity) => Value::Integer(*quantity),
        }
    }
}

/// Store primitives for the catalogue.
pub trait BookRepository {
    /// Appends a new record. Fails with `DuplicateKey` if the id exists.
    fn insert(&self, book: &BookRecord) -> RepoResult<BookId>;
    /// Overwrites title/author/quantity of the record with `book.id`.
    /// Returns the number of affected rows (0 when absent).
    fn update(&self, book: &BookRecord) -> RepoResult<usize>;
    /// Removes the record with `id`. Returns the number of affected rows.
    fn delete(&self, id: BookId) -> RepoResult<usize>;
    /// Returns every record in storage order.
    fn query_all(&self) -> RepoResult<Vec<BookRecord>>;
    /// Returns every record whose column equals the filter value.
    fn query_by(&self, filter: BookFilter<'_>) -> RepoResult<Vec<BookRecord>>;
}

impl<R: BookRepository + ?Sized> BookRepository for &R {
    fn insert(&self, book: &BookRecord) -> RepoResult<BookId> {
        (**self).insert(book)
    }

    fn update(&self, book: &BookRecord) -> RepoResult<usize> {
        (**self).update(book)
    }

    fn delete(&self, id: BookId) -> RepoResult<usize> {
        (**self).delete(id)
    }

    fn query_all(&self) -> RepoResult<Vec<BookRecord>> {
        (**self).query_all()
    }

    fn query_by(&self, filter: BookFilter<'_>) -> RepoResult<Vec<BookRecord>> {
        (**self).query_by(filter)
    }
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a bootstrapped connection.
    ///
    /// # Errors
    /// - `RepoError::MissingRequiredTable` when the catalogue table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [CATALOGUE_TABLE],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(CATALOGUE_TABLE));
        }
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert(&self, book: &BookRecord) -> RepoResult<BookId> {
        book.validate()?;

        let result = self.conn.execute(
            "INSERT INTO ebookstore (id, title, author, qty) VALUES (?1, ?2, ?3, ?4);",
            params![book.id, book.title.as_str(), book.author.as_str(), book.quantity],
        );
        match result {
            Ok(_) => {
                debug!("event=book_insert module=repo status=ok id={}", book.id);
                Ok(book.id)
            }
            Err(err) if is_unique_violation(&err) => {
                debug!(
                    "event=book_insert module=repo status=error error_code=duplicate_key id={}",
                    book.id
                );
                Err(RepoError::DuplicateKey(book.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update(&self, book: &BookRecord) -> RepoResult<usize> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE ebookstore
             SET
                title = ?1,
                author = ?2,
                qty = ?3
             WHERE id = ?4;",
            params![book.title.as_str(), book.author.as_str(), book.quantity, book.id],
        )?;

        debug!(
            "event=book_update module=repo status=ok id={} rows={}",
            book.id, changed
        );
        Ok(changed)
    }

    fn delete(&self, id: BookId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM ebookstore WHERE id = ?1;", [id])?;

        debug!("event=book_delete module=repo status=ok id={id} rows={changed}");
        Ok(changed)
    }

    fn query_all(&self) -> RepoResult<Vec<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn query_by(&self, filter: BookFilter<'_>) -> RepoResult<Vec<BookRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE {} = ?1
             ORDER BY rowid ASC;",
            filter.column()
        ))?;
        let mut rows = stmt.query([filter.bind_value()])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<BookRecord> {
    let id: BookId = row.get("id")?;
    let quantity = match row.get::<_, Value>("qty")? {
        Value::Integer(value) => value,
        other => {
            return Err(RepoError::InvalidData(format!(
                "non-integer quantity {other:?} for id {id} in ebookstore.qty"
            )));
        }
    };

    Ok(BookRecord {
        id,
        title: row.get("title")?,
        author: row.get("author")?,
        quantity,
    })
}

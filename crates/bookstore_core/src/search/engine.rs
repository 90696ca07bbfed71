//! Criteria dispatch over the Store primitives.
//!
//! # Invariants
//! - No criteria means `query_all`; any criteria means exactly one `query_by`.
//! - An empty result is "not found", never an error.

use crate::model::book::BookRecord;
use crate::repo::book_repo::{BookRepository, RepoResult};
use crate::search::criteria::Criteria;
use log::debug;

/// Resolves `criteria` against the repository.
pub fn search<R: BookRepository + ?Sized>(
    repo: &R,
    criteria: &Criteria,
) -> RepoResult<Vec<BookRecord>> {
    let books = match criteria.as_filter() {
        Some(filter) => repo.query_by(filter)?,
        None => repo.query_all()?,
    };

    debug!(
        "event=book_search module=search status=ok field={} hits={}",
        criteria.field().map_or("all", |field| field.label()),
        books.len()
    );
    Ok(books)
}

//! Core catalogue logic for the bookstore inventory manager.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, SeedStatus};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::book::{
    parse_book_id, parse_quantity, BookId, BookRecord, BookValidationError, DEFAULT_AUTHOR,
    DEFAULT_QUANTITY, DEFAULT_TITLE,
};
pub use repo::book_repo::{
    BookFilter, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use search::criteria::{Criteria, SearchField, UnknownFieldError};
pub use search::engine::search;
pub use service::catalogue_service::{
    BookFields, CatalogueError, CatalogueResult, CatalogueService, Confirmation, ModifyPlan,
    WorkflowOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the catalogue Store primitives (insert/update/delete/query).
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Each write primitive is a single statement that commits immediately.
//! - Repository writes must enforce `BookRecord::validate()` before persistence.
//! - Update/delete on a missing id affect zero rows and are not errors.

pub mod book_repo;

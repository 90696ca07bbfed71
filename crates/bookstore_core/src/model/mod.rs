//! Catalogue domain model.
//!
//! # Responsibility
//! - Define the single book record shape used by every core layer.
//! - Own the parsing rules that turn raw user text into typed fields.
//!
//! # Invariants
//! - Every record is identified by a unique integer `BookId`.
//! - Identifiers are immutable once a record exists.

pub mod book;

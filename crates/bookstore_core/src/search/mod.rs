//! Catalogue query engine.
//!
//! # Responsibility
//! - Model single-field search criteria.
//! - Resolve criteria to Store queries.

pub mod criteria;
pub mod engine;

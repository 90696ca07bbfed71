//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into confirmation-gated workflows.
//! - Keep the terminal layer decoupled from storage details.

pub mod catalogue_service;

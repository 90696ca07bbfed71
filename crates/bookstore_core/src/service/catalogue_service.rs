//! Catalogue use-case service.
//!
//! # Responsibility
//! - Provide search/list entry points and the add/modify/delete workflows.
//! - Check existence and uniqueness preconditions before any Store write.
//!
//! # Invariants
//! - Every workflow is validate -> stage -> confirm -> commit-or-abort.
//! - No write primitive runs without `Confirmation::Confirmed`.
//! - Modify never changes the record id.

use crate::model::book::{
    non_blank, parse_book_id, parse_quantity, BookId, BookRecord, BookValidationError,
};
use crate::repo::book_repo::{BookRepository, RepoError};
use crate::search::criteria::{Criteria, SearchField};
use crate::search::engine::search;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// Service error for catalogue use-cases.
#[derive(Debug)]
pub enum CatalogueError {
    /// Malformed id or field value.
    Validation(BookValidationError),
    /// Id already in use.
    DuplicateKey(BookId),
    /// Target record does not exist.
    NotFound(BookId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CatalogueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey(id) => write!(f, "ID {id} already in use"),
            Self::NotFound(id) => write!(f, "ID {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatalogueError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateKey(id) => Self::DuplicateKey(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<BookValidationError> for CatalogueError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Caller's answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// Interprets a yes/no answer. Returns `None` for anything else so the
    /// caller can ask again.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(Self::Confirmed),
            "no" => Some(Self::Declined),
            _ => None,
        }
    }

    pub fn is_confirmed(self) -> bool {
        self == Self::Confirmed
    }
}

/// Result of a confirmation-gated workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome<T> {
    /// The write was performed.
    Committed(T),
    /// The caller declined; nothing was written.
    Aborted,
}

impl<T> WorkflowOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Optional raw field values supplied by the caller.
///
/// Blank strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<String>,
}

impl BookFields {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            quantity: Some(quantity.into()),
        }
    }

    fn parsed_quantity(&self) -> Result<Option<i64>, BookValidationError> {
        match self.quantity.as_deref() {
            Some(raw) => parse_quantity(raw),
            None => Ok(None),
        }
    }
}

/// Staged modification: the stored record and its replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyPlan {
    pub current: BookRecord,
    pub updated: BookRecord,
}

/// Catalogue service facade over repository implementations.
pub struct CatalogueService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> CatalogueService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs a single-criteria query. `Criteria::None` lists everything.
    pub fn search(&self, criteria: &Criteria) -> CatalogueResult<Vec<BookRecord>> {
        Ok(search(&self.repo, criteria)?)
    }

    /// Searches by raw user text for one field.
    ///
    /// Numeric fields with non-numeric text yield an empty result.
    pub fn search_input(&self, field: SearchField, raw: &str) -> CatalogueResult<Vec<BookRecord>> {
        match Criteria::from_input(field, raw) {
            Some(criteria) => self.search(&criteria),
            None => Ok(Vec::new()),
        }
    }

    /// Returns the full catalogue in storage order.
    pub fn list_all(&self) -> CatalogueResult<Vec<BookRecord>> {
        self.search(&Criteria::None)
    }

    /// Gets one record by id through the query engine.
    pub fn find(&self, id: BookId) -> CatalogueResult<Option<BookRecord>> {
        Ok(search(&self.repo, &Criteria::ById(id))?.into_iter().next())
    }

    /// Checks that `raw_id` is four digits and not in use yet.
    pub fn validate_new_id(&self, raw_id: &str) -> CatalogueResult<BookId> {
        let id = parse_book_id(raw_id)?;
        if self.find(id)?.is_some() {
            info!(
                "event=workflow_add module=service status=rejected error_code=duplicate_key id={id}"
            );
            return Err(CatalogueError::DuplicateKey(id));
        }
        Ok(id)
    }

    /// Validates a new id and stages the record to insert.
    ///
    /// # Errors
    /// - `Validation` when the id is not four digits or quantity is malformed.
    /// - `DuplicateKey` when the id is already in use.
    pub fn prepare_add(&self, raw_id: &str, fields: &BookFields) -> CatalogueResult<BookRecord> {
        let id = self.validate_new_id(raw_id)?;
        let quantity = fields.parsed_quantity()?;
        Ok(BookRecord::with_defaults(
            id,
            fields.title.as_deref(),
            fields.author.as_deref(),
            quantity,
        ))
    }

    /// Inserts a staged record when confirmed.
    pub fn commit_add(
        &self,
        candidate: &BookRecord,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        if !confirmation.is_confirmed() {
            info!(
                "event=workflow_add module=service status=aborted id={}",
                candidate.id
            );
            return Ok(WorkflowOutcome::Aborted);
        }

        self.repo.insert(candidate)?;
        info!(
            "event=workflow_add module=service status=committed id={}",
            candidate.id
        );
        Ok(WorkflowOutcome::Committed(candidate.clone()))
    }

    /// One-shot add: validate, stage and commit-or-abort.
    pub fn add(
        &self,
        raw_id: &str,
        fields: &BookFields,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        let candidate = self.prepare_add(raw_id, fields)?;
        self.commit_add(&candidate, confirmation)
    }

    /// Loads an existing record and stages its replacement. Blank fields
    /// keep their current value.
    pub fn prepare_modify(&self, id: BookId, edits: &BookFields) -> CatalogueResult<ModifyPlan> {
        let current = self.find(id)?.ok_or(CatalogueError::NotFound(id))?;

        let mut updated = current.clone();
        if let Some(title) = non_blank(edits.title.as_deref()) {
            updated.title = title.to_string();
        }
        if let Some(author) = non_blank(edits.author.as_deref()) {
            updated.author = author.to_string();
        }
        if let Some(quantity) = edits.parsed_quantity()? {
            updated.quantity = quantity;
        }

        Ok(ModifyPlan { current, updated })
    }

    /// Writes a staged modification when confirmed.
    ///
    /// # Errors
    /// - `NotFound` if the record disappeared after staging.
    pub fn commit_modify(
        &self,
        plan: &ModifyPlan,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        let id = plan.current.id;
        if !confirmation.is_confirmed() {
            info!("event=workflow_modify module=service status=aborted id={id}");
            return Ok(WorkflowOutcome::Aborted);
        }

        // Staged edits can never move a record to another id.
        let mut updated = plan.updated.clone();
        updated.id = id;

        if self.repo.update(&updated)? == 0 {
            return Err(CatalogueError::NotFound(id));
        }
        info!("event=workflow_modify module=service status=committed id={id}");
        Ok(WorkflowOutcome::Committed(updated))
    }

    /// One-shot modify: look up, stage edits and commit-or-abort.
    pub fn modify(
        &self,
        id: BookId,
        edits: &BookFields,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        let plan = self.prepare_modify(id, edits)?;
        self.commit_modify(&plan, confirmation)
    }

    /// Loads the record that a delete would remove.
    pub fn prepare_delete(&self, id: BookId) -> CatalogueResult<BookRecord> {
        self.find(id)?.ok_or(CatalogueError::NotFound(id))
    }

    /// Deletes a staged record when confirmed.
    pub fn commit_delete(
        &self,
        book: &BookRecord,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        if !confirmation.is_confirmed() {
            info!(
                "event=workflow_delete module=service status=aborted id={}",
                book.id
            );
            return Ok(WorkflowOutcome::Aborted);
        }

        if self.repo.delete(book.id)? == 0 {
            return Err(CatalogueError::NotFound(book.id));
        }
        info!(
            "event=workflow_delete module=service status=committed id={}",
            book.id
        );
        Ok(WorkflowOutcome::Committed(book.clone()))
    }

    /// One-shot delete: look up and commit-or-abort.
    pub fn delete(
        &self,
        id: BookId,
        confirmation: Confirmation,
    ) -> CatalogueResult<WorkflowOutcome<BookRecord>> {
        let book = self.prepare_delete(id)?;
        self.commit_delete(&book, confirmation)
    }
}

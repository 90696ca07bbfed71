//! Book record model and input parsing.
//!
//! # Responsibility
//! - Define the canonical `BookRecord` stored in the catalogue table.
//! - Normalize user-entered ids, text fields and quantities at the boundary.
//!
//! # Invariants
//! - New ids are exactly four ASCII digits before integer conversion.
//! - `quantity` is never negative.
//! - Blank title/author/quantity on creation fall back to fixed placeholders.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static BOOK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid book id regex"));

/// Integer identifier shared by storage and callers.
pub type BookId = i64;

/// Title stored when the caller leaves the title blank on creation.
pub const DEFAULT_TITLE: &str = "default_book_title";
/// Author stored when the caller leaves the author blank on creation.
pub const DEFAULT_AUTHOR: &str = "default_book_author";
/// Quantity stored when the caller leaves the quantity blank on creation.
pub const DEFAULT_QUANTITY: i64 = 0;

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Copies in stock.
    pub quantity: i64,
}

impl BookRecord {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }

    /// Builds a new record from optional user input, applying placeholders
    /// for blank fields.
    pub fn with_defaults(
        id: BookId,
        title: Option<&str>,
        author: Option<&str>,
        quantity: Option<i64>,
    ) -> Self {
        Self {
            id,
            title: non_blank(title).unwrap_or(DEFAULT_TITLE).to_string(),
            author: non_blank(author).unwrap_or(DEFAULT_AUTHOR).to_string(),
            quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
        }
    }

    /// Validates write-time invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.quantity < 0 {
            return Err(BookValidationError::InvalidQuantity(
                self.quantity.to_string(),
            ));
        }
        Ok(())
    }
}

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Id is not exactly four numeric characters.
    InvalidId(String),
    /// Quantity is not a non-negative integer.
    InvalidQuantity(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => {
                write!(f, "invalid book id `{value}`: expected exactly 4 digits")
            }
            Self::InvalidQuantity(value) => write!(
                f,
                "invalid quantity `{value}`: expected a whole number of copies"
            ),
        }
    }
}

impl Error for BookValidationError {}

/// Parses a new-record id. The trimmed text must be exactly four ASCII
/// digits; leading zeros are allowed and dropped by integer conversion.
pub fn parse_book_id(raw: &str) -> Result<BookId, BookValidationError> {
    let trimmed = raw.trim();
    if !BOOK_ID_RE.is_match(trimmed) {
        return Err(BookValidationError::InvalidId(trimmed.to_string()));
    }
    trimmed
        .parse::<BookId>()
        .map_err(|_| BookValidationError::InvalidId(trimmed.to_string()))
}

/// Parses an optional quantity field. Blank input yields `None`.
pub fn parse_quantity(raw: &str) -> Result<Option<i64>, BookValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<i64>() {
        Ok(value) if value >= 0 => Ok(Some(value)),
        _ => Err(BookValidationError::InvalidQuantity(trimmed.to_string())),
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

//! Search criteria model.
//!
//! # Invariants
//! - A criteria carries at most one field/value pair.
//! - Keyword-style construction honors only the first known field.

use crate::model::book::BookId;
use crate::repo::book_repo::BookFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Searchable catalogue column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Title,
    Author,
    Quantity,
}

impl SearchField {
    /// Upper-case label used in result headers and not-found messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "TITLE",
            Self::Author => "AUTHOR",
            Self::Quantity => "QUANTITY",
        }
    }
}

/// Unknown search field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl Display for UnknownFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown search field `{}`; expected id|title|author|quantity",
            self.0
        )
    }
}

impl Error for UnknownFieldError {}

impl FromStr for SearchField {
    type Err = UnknownFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "quantity" | "qty" => Ok(Self::Quantity),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Optional single-field filter for catalogue queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Criteria {
    /// No filter: the whole catalogue.
    #[default]
    None,
    ById(BookId),
    ByTitle(String),
    ByAuthor(String),
    ByQuantity(i64),
}

impl Criteria {
    /// Converts raw user text for `field` into a criteria.
    ///
    /// Returns `None` when the text can never match a numeric column
    /// (for example `ID = "abc"`); callers treat that as "not found".
    /// Text fields are matched verbatim, including surrounding whitespace.
    pub fn from_input(field: SearchField, raw: &str) -> Option<Self> {
        match field {
            SearchField::Id => raw.trim().parse().ok().map(Self::ById),
            SearchField::Title => Some(Self::ByTitle(raw.to_string())),
            SearchField::Author => Some(Self::ByAuthor(raw.to_string())),
            SearchField::Quantity => raw.trim().parse().ok().map(Self::ByQuantity),
        }
    }

    /// Builds a criteria from keyword-style `(field, value)` pairs.
    ///
    /// Unknown field names are skipped. The first known field wins and all
    /// later pairs are ignored, even when its value cannot match.
    pub fn from_pairs<'a, I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in pairs {
            if let Ok(field) = name.parse::<SearchField>() {
                return Self::from_input(field, value);
            }
        }
        Some(Self::None)
    }

    /// Field this criteria filters on, if any.
    pub fn field(&self) -> Option<SearchField> {
        match self {
            Self::None => None,
            Self::ById(_) => Some(SearchField::Id),
            Self::ByTitle(_) => Some(SearchField::Title),
            Self::ByAuthor(_) => Some(SearchField::Author),
            Self::ByQuantity(_) => Some(SearchField::Quantity),
        }
    }

    pub(crate) fn as_filter(&self) -> Option<BookFilter<'_>> {
        match self {
            Self::None => None,
            Self::ById(id) => Some(BookFilter::Id(*id)),
            Self::ByTitle(title) => Some(BookFilter::Title(title)),
            Self::ByAuthor(author) => Some(BookFilter::Author(author)),
            Self::ByQuantity(quantity) => Some(BookFilter::Quantity(*quantity)),
        }
    }
}

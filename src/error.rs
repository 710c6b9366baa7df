//! Error types for clause extraction

use std::fmt;
use thiserror::Error;

use crate::clause::ClauseKind;

/// Result type alias for decomposer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a statement was rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    MissingTerminator,
    NotASelect,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformation::MissingTerminator => write!(f, "';' is not found at the end of the query"),
            Malformation::NotASelect => write!(f, "'select' is not found at the start of the query"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The statement cannot be decomposed at all
    #[error("Malformed statement: {0}")]
    MalformedStatement(Malformation),

    /// A mandatory clause is absent
    #[error("Missing clause: '{}' list is not found", .0.keyword())]
    MissingClause(ClauseKind),

    /// An extracted fragment does not have the shape its clause requires
    #[error("Invalid item in '{}' clause: {hint}", .clause.keyword())]
    InvalidClauseItem { clause: ClauseKind, hint: String },
}

impl Error {
    pub(crate) fn invalid_item(clause: ClauseKind, hint: impl Into<String>) -> Self {
        Error::InvalidClauseItem {
            clause,
            hint: hint.into(),
        }
    }
}

//! Domain-level error types.

use std::fmt;

use thiserror::Error;

/// A single rejected payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain errors - every failure a repository operation can surface.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Authentication required")]
    Unauthenticated,

    /// A repository hook the specialization never supplied.
    #[error("{0}() must be implemented.")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl DomainError {
    /// Shorthand for a storage query failure.
    pub fn query(err: impl fmt::Display) -> Self {
        Self::Storage(RepoError::Query(err.to_string()))
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

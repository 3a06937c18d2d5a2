//! Error taxonomy for roster operations.
//!
//! Field-rule failures are carried as data inside [`RosterError::Validation`];
//! business-rule failures (duplicate id, missing id) and storage faults are
//! raised to the immediate caller. Nothing here retries.

use thiserror::Error;

use crate::validation::ValidationOutcome;

pub type Result<T, E = RosterError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RosterError {
    /// One or more field rules were violated. Recoverable by correcting input.
    #[error("{0}")]
    Validation(ValidationOutcome),

    #[error("Student ID '{0}' already exists.")]
    DuplicateId(String),

    #[error("Student ID '{0}' not found.")]
    NotFound(String),

    /// The storage engine failed. Treated as a fault and not retried.
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    pub fn validation(outcome: ValidationOutcome) -> Self {
        Self::Validation(outcome)
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Storage(err.into())
    }

    /// Returns the violation list when this is a validation failure.
    pub fn violations(&self) -> Option<&ValidationOutcome> {
        match self {
            Self::Validation(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Storage and I/O failures are faults; everything else is caller error.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_))
    }
}

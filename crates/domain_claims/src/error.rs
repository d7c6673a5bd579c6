//! Claims domain errors

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use core_kernel::{ClaimId, DocumentId, MoneyError, PortError, TemporalError};

use crate::claim::ClaimStatus;
use crate::workflow::ClaimAction;

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the offending field, e.g. `lines[0].hours`
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Document {document_id} not found on claim {claim_id}")]
    DocumentNotFound {
        claim_id: ClaimId,
        document_id: DocumentId,
    },

    #[error("Cannot {action} a claim that is {from}")]
    InvalidTransition { from: ClaimStatus, action: ClaimAction },

    #[error("Validation failed: {}", join_fields(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Document storage error: {0}")]
    Storage(#[from] PortError),
}

impl ClaimError {
    /// Creates a validation failure for a single field
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::ValidationFailed(vec![FieldError::new(field, message)])
    }

    /// Returns the field messages of a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClaimError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }
}

impl From<TemporalError> for ClaimError {
    fn from(err: TemporalError) -> Self {
        let field = match err {
            TemporalError::InvalidMonth(_) => "month",
            TemporalError::InvalidYear(_) => "year",
        };
        ClaimError::invalid_field(field, err.to_string())
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Core capability errors (identity, validation, lifecycle refusals).
//!
//! These are bounded and stable: they represent domain/refusal states,
//! not library implementation details.

use thiserror::Error;

use super::domain::EntityState;

/// Invalid identifier.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("entity id `{raw}` is invalid: {reason}")]
    Entity { raw: String, reason: String },
    #[error("actor id `{raw}` is invalid: {reason}")]
    Actor { raw: String, reason: String },
}

/// Canonical error enum for the domain core.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    #[error("entity `{id}` not found")]
    NotFound { id: String },

    #[error("cannot transition from `{from}` to `{to}`")]
    InvalidTransition { from: EntityState, to: EntityState },

    #[error("unknown state `{raw}`")]
    UnknownState { raw: String },

    #[error("{field} must not be empty")]
    Validation { field: &'static str },
}

impl CoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Non-empty check for free-text fields coming from the form layer.
    pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), CoreError> {
        if value.trim().is_empty() {
            Err(CoreError::Validation { field })
        } else {
            Ok(())
        }
    }
}

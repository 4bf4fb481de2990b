//! Cross-cutting error types for Steward.
//!
//! Domain-specific errors (e.g., `LineageError`, `GateError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors raised by entity transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid_transition(
        entity_type: &str,
        id: &str,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

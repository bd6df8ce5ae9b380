//! Cross-cutting error types.
//!
//! Crate-specific errors (`SourceError`, `StoreError`, `PipelineError`) live in
//! their own crates. `CoreError` covers failures in the shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A status transition that the state machine does not allow.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (format, unknown enum value, missing field).
    #[error("Validation error: {0}")]
    Validation(String),
}

//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using DeckError.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Errors raised by deck operations and deck validation.
#[derive(Debug, Error, PartialEq)]
pub enum DeckError {
    #[error("card not found: {0}")]
    UnknownCard(String),

    #[error("duplicate card ID {0}")]
    DuplicateId(String),

    #[error("card stored under key {key} has ID {id}")]
    MismatchedId { key: String, id: String },

    #[error("card {id} has invalid easiness {easiness}")]
    InvalidEasiness { id: String, easiness: f64 },

    #[error("queue references missing card {0}")]
    DanglingQueueEntry(String),
}

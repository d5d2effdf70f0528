//! Error types for leitner-core.

use crate::types::CardId;
use thiserror::Error;

/// Result type alias using Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a value crossing the crate boundary is malformed.
///
/// Absence is never reported here: a card missing from every bucket or an
/// empty bucket sequence produce empty results, not errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid answer difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("invalid card ID: {0}")]
    InvalidCardId(String),

    #[error("invalid ID format at line {line}: {value}")]
    InvalidId { line: usize, value: String },

    #[error("duplicate card ID {id} at line {line}")]
    DuplicateId { id: CardId, line: usize },

    #[error("card {id} appears in bucket {first} and bucket {second}")]
    DuplicateCard {
        id: CardId,
        first: usize,
        second: usize,
    },

    #[error("text outside a question, answer or hint at line {line}")]
    StrayText { line: usize },

    #[error("card {id} cannot be written as a deck entry: {reason}")]
    Unwritable { id: CardId, reason: String },

    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("study day {day} is before the start date {start}")]
    BeforeStart {
        start: chrono::NaiveDate,
        day: chrono::NaiveDate,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("practice session has no cards left to grade")]
    SessionFinished,
}

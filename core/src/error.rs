use thiserror::Error;

use crate::{types::RecordId, validation::ValidationError};

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History record {id} is unreadable: {detail}")]
    InvalidRecord { id: RecordId, detail: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MortgageError {
    /// True for failures of the history store rather than of user input.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Database(_) | Self::InvalidRecord { .. })
    }
}

pub type MortgageResult<T> = Result<T, MortgageError>;

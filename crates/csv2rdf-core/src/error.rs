//! Core error types.

use thiserror::Error;

/// Errors raised while loading configuration or translating data.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or stream error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text could not be read.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input file has no header line.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The interactive collaborator could not produce an answer.
    #[error("prompt error: {0}")]
    Prompt(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input CSV file does not exist.
    #[error("could not open file: {}", .0.display())]
    MissingInput(PathBuf),

    /// Config, translation, or prompt error.
    #[error(transparent)]
    Core(#[from] csv2rdf_core::Error),

    /// Terminal could not be set up for questions.
    #[error("console error: {0}")]
    Console(#[from] rustyline::error::ReadlineError),
}

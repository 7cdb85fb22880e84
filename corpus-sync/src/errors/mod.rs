//! Error types for the corpus sync CLI.

use std::path::PathBuf;

use thiserror::Error;

use corpus_sync_repository::SyncError;

/// Errors that can occur while running a CLI command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A referenced import file is absent on disk.
    #[error("Import file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// An input file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// An input file did not hold the expected JSON shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to serialize a document for output.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the sync engine or the store behind it.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an I/O error.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error terminates the process under the fail-fast policy.
    ///
    /// Missing input files are fatal at this layer; store errors defer to
    /// [`SyncError::is_fatal`]. Everything else propagates as an ordinary
    /// error result.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::MissingInput(_) => true,
            Self::Sync(err) => err.is_fatal(),
            _ => false,
        }
    }
}

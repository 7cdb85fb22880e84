//! Sync error types.
//!
//! This module defines the unified error type for all corpus sync operations,
//! covering transport failures, missing indices, bulk write rejections, and
//! response parsing problems.

use thiserror::Error;

/// Unified errors from corpus sync operations.
///
/// Every store-facing call returns `Result<T, SyncError>` so that callers can
/// decide how to react; the library itself never terminates the process.
/// Connectivity and not-found failures are the two kinds treated as fatal by
/// the operator CLI (see [`SyncError::is_fatal`]); everything else propagates
/// as an ordinary error value.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// Invalid caller input (e.g. an empty index name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failure reaching the store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The targeted index does not exist for an operation that requires it to.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Failed to create an index.
    #[error("Index creation error: {0}")]
    IndexCreation(String),

    /// A bulk write was rejected, entirely or for individual actions.
    #[error("Bulk write error: {0}")]
    BulkWrite(String),

    /// Failed to parse a response from the store.
    #[error("Response parse error: {0}")]
    ResponseParse(String),

    /// Anything else raised by the store or transport.
    #[error("Unclassified store error: {0}")]
    Unclassified(String),
}

impl SyncError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an index-not-found error.
    pub fn index_not_found(index: impl Into<String>) -> Self {
        Self::IndexNotFound(index.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreation(msg.into())
    }

    /// Create a bulk write error.
    pub fn bulk_write(msg: impl Into<String>) -> Self {
        Self::BulkWrite(msg.into())
    }

    /// Create a response parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ResponseParse(msg.into())
    }

    /// Create an unclassified error.
    pub fn unclassified(msg: impl Into<String>) -> Self {
        Self::Unclassified(msg.into())
    }

    /// Classify a non-success store response into the error taxonomy.
    ///
    /// A 404 means the targeted resource does not exist; every other
    /// non-success status is left unclassified and carries the status and
    /// response body for the caller's own handling.
    pub fn classify_status(operation: &str, status: u16, body: &str) -> Self {
        if status == 404 {
            Self::IndexNotFound(format!("{} failed: {}", operation, body))
        } else {
            Self::Unclassified(format!("{} failed with status {}: {}", operation, status, body))
        }
    }

    /// Whether this error kind is fatal under the fail-fast policy.
    ///
    /// Connectivity and not-found failures are non-recoverable for a batch
    /// transfer; the operator CLI terminates on them. All other kinds are
    /// left to the caller.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::IndexNotFound(_))
    }
}

//! Error types for the corpus sync repository.
//!
//! This module provides a unified error type for all store-facing operations.

mod sync_error;

pub use sync_error::SyncError;

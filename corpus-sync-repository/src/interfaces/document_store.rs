//! Document store trait definition.
//!
//! This module defines the abstract interface for the search index backend,
//! allowing for different implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use corpus_sync_shared::{Query, SearchHit, WriteAction};

use crate::errors::SyncError;

/// Abstracts the underlying document store (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into [`crate::CorpusSyncService`] to enable
/// dependency injection and easy testing with mock implementations. The
/// service layers all batching and pagination policy on top of these
/// primitives; implementations should perform exactly one store request per
/// call and classify failures into [`SyncError`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check whether an index exists. Never creates as a side effect.
    async fn exists_index(&self, index: &str) -> Result<bool, SyncError>;

    /// Create an index with store-default settings.
    ///
    /// Idempotent: an "already exists" response from the store is success,
    /// not an error.
    async fn create_index(&self, index: &str) -> Result<(), SyncError>;

    /// Delete an index and all documents in it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(SyncError::IndexNotFound)` - If the index does not exist
    async fn delete_index(&self, index: &str) -> Result<(), SyncError>;

    /// Submit one bulk request containing the given write actions.
    ///
    /// The whole slice is sent as a single store round trip. Individual
    /// action failures reported by the store surface as
    /// [`SyncError::BulkWrite`].
    async fn bulk_write(&self, actions: &[WriteAction]) -> Result<(), SyncError>;

    /// Count documents matching `query`, as an exact total rather than a
    /// lower-bound approximation.
    async fn count(&self, index: &str, doc_type: &str, query: &Query) -> Result<u64, SyncError>;

    /// Fetch one page of documents matching `query`.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of matching documents to skip
    /// * `limit` - Maximum number of hits to return
    ///
    /// # Returns
    ///
    /// The hits of this page in the store's default ordering; fewer than
    /// `limit` hits (possibly none) when the result set is exhausted.
    async fn search(
        &self,
        index: &str,
        doc_type: &str,
        query: &Query,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<SearchHit>, SyncError>;
}

//! Corpus sync service implementation.
//!
//! This module provides the main entry point for moving document corpora in
//! and out of the search index. Application code uses this to bulk-load
//! documents, replace existing documents, and export a whole index.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument};

use corpus_sync_shared::{Document, DocumentId, Query, WriteAction};

use crate::config::SyncConfig;
use crate::errors::SyncError;
use crate::export::{export_stream, DocumentStream};
use crate::interfaces::DocumentStore;

/// The main service for synchronizing document corpora with the store.
///
/// All transfer policy lives here: existence-gating of writes, splitting
/// large collections into bounded bulk batches, and paginated export. The
/// store itself is injected as a [`DocumentStore`], so the service can be
/// exercised against mock implementations in tests.
///
/// Batches and pages are issued strictly sequentially; each call waits for
/// the prior response before proceeding. No batch is retried: the first
/// failed store call aborts the whole operation.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use corpus_sync_repository::{CorpusSyncService, OpenSearchStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(OpenSearchStore::new("http://localhost:9200").await?);
/// let service = CorpusSyncService::new(store);
///
/// let docs = vec![/* serde_json objects */];
/// service.insert_all("books", "_doc", docs).await?;
/// # Ok(())
/// # }
/// ```
pub struct CorpusSyncService {
    store: Arc<dyn DocumentStore>,
    config: SyncConfig,
}

impl CorpusSyncService {
    /// Create a new service with default configuration (batch size 1000).
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            config: SyncConfig::default(),
        }
    }

    /// Create a new service with custom configuration.
    pub fn with_config(store: Arc<dyn DocumentStore>, config: SyncConfig) -> Self {
        Self { store, config }
    }

    /// Validate that an index name is usable.
    fn validate_index_name(index: &str) -> Result<(), SyncError> {
        if index.is_empty() {
            return Err(SyncError::validation("index name must be non-empty"));
        }
        Ok(())
    }

    /// Check whether an index exists. Never creates as a side effect.
    pub async fn exists(&self, index: &str) -> Result<bool, SyncError> {
        Self::validate_index_name(index)?;
        self.store.exists_index(index).await
    }

    /// Ensure an index exists, creating it if necessary.
    ///
    /// Idempotent: once an index exists, repeated calls issue only the
    /// existence check. A concurrent create racing this call is also fine,
    /// since the store treats "already exists" as success.
    pub async fn ensure_index_exists(&self, index: &str) -> Result<(), SyncError> {
        Self::validate_index_name(index)?;
        if self.store.exists_index(index).await? {
            debug!(index = %index, "Index already present");
            return Ok(());
        }
        self.store.create_index(index).await?;
        info!(index = %index, "Created missing index");
        Ok(())
    }

    /// Bulk-load a document collection into an index.
    ///
    /// Ensures the index exists, then partitions `documents` into
    /// consecutive batches of at most `batch_size` and issues one bulk-write
    /// call per batch, in input order. The store assigns ids (unless a
    /// document embeds one itself).
    ///
    /// An empty collection performs zero bulk calls but still ensures the
    /// index exists.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index name
    /// * `doc_type` - Document type label, passed through to the store
    /// * `documents` - The documents to load, in order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every batch was accepted
    /// * `Err(SyncError)` - On the first failed store call; later batches
    ///   are not submitted
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn insert_all(
        &self,
        index: &str,
        doc_type: &str,
        documents: Vec<Document>,
    ) -> Result<(), SyncError> {
        Self::validate_index_name(index)?;
        self.ensure_index_exists(index).await?;

        if documents.is_empty() {
            debug!(index = %index, "Nothing to insert");
            return Ok(());
        }

        let batch_size = self.config.batch_size;
        let total_batches = documents.len().div_ceil(batch_size);

        for (batch, chunk) in documents.chunks(batch_size).enumerate() {
            let actions: Vec<WriteAction> = chunk
                .iter()
                .map(|doc| WriteAction::index(index, doc_type, doc.clone()))
                .collect();
            self.store.bulk_write(&actions).await?;
            debug!(
                index = %index,
                batch = batch + 1,
                total_batches,
                size = chunk.len(),
                "Submitted bulk batch"
            );
        }

        info!(index = %index, documents = documents.len(), batches = total_batches, "Bulk load complete");
        Ok(())
    }

    /// Replace existing documents by id, with the same batching discipline
    /// as [`Self::insert_all`].
    ///
    /// Each `(id, document)` pair becomes one id-tagged index action, so the
    /// replacement document fully overwrites whatever the store holds under
    /// that id. Unlike inserts, this does not create a missing index: a
    /// replacement targets documents that are already there, and a missing
    /// index surfaces as a store error.
    ///
    /// An empty collection returns immediately with no store calls.
    #[instrument(skip(self, replacements), fields(count = replacements.len()))]
    pub async fn update_all(
        &self,
        index: &str,
        doc_type: &str,
        replacements: Vec<(DocumentId, Document)>,
    ) -> Result<(), SyncError> {
        Self::validate_index_name(index)?;

        if replacements.is_empty() {
            return Ok(());
        }

        let batch_size = self.config.batch_size;
        let total_batches = replacements.len().div_ceil(batch_size);

        for (batch, chunk) in replacements.chunks(batch_size).enumerate() {
            let actions: Vec<WriteAction> = chunk
                .iter()
                .map(|(id, doc)| WriteAction::index_with_id(index, doc_type, id.clone(), doc.clone()))
                .collect();
            self.store.bulk_write(&actions).await?;
            debug!(
                index = %index,
                batch = batch + 1,
                total_batches,
                size = chunk.len(),
                "Submitted replacement batch"
            );
        }

        Ok(())
    }

    /// Export every document in an index as a lazy `(id, document)` stream.
    ///
    /// The first poll checks that the index exists; a missing index yields
    /// an empty stream with no further store calls. Otherwise the stream
    /// counts the corpus once and then fetches pages of `batch_size`
    /// documents on demand, each page only when the previous one has been
    /// drained. Ordering is the store's default ordering for a match-all
    /// query; no additional sort is imposed.
    pub fn read_all(&self, index: &str, doc_type: &str) -> DocumentStream {
        if let Err(err) = Self::validate_index_name(index) {
            return stream::once(async move { Err::<(DocumentId, Document), _>(err) }).boxed();
        }
        export_stream(
            self.store.clone(),
            index.to_string(),
            doc_type.to_string(),
            self.config.batch_size as u64,
        )
    }

    /// Count the documents in an index with an exact match-all total.
    pub async fn count_documents(&self, index: &str, doc_type: &str) -> Result<u64, SyncError> {
        Self::validate_index_name(index)?;
        self.store.count(index, doc_type, &Query::MatchAll).await
    }

    /// Find the first document whose `field` equals `value`.
    ///
    /// This is the full extent of query support: a single-field equality
    /// filter returning at most one hit.
    pub async fn find_by_field(
        &self,
        index: &str,
        doc_type: &str,
        field: &str,
        value: impl Into<serde_json::Value>,
    ) -> Result<Option<(DocumentId, Document)>, SyncError> {
        Self::validate_index_name(index)?;
        let query = Query::term(field, value.into());
        let hits = self.store.search(index, doc_type, &query, 0, 1).await?;
        Ok(hits.into_iter().next().map(|hit| (hit.id, hit.source)))
    }

    /// Delete an index and every document in it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(SyncError::IndexNotFound)` - If the index does not exist
    pub async fn delete_index(&self, index: &str) -> Result<(), SyncError> {
        Self::validate_index_name(index)?;
        self.store.delete_index(index).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use corpus_sync_shared::{SearchHit, WriteOp};
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Recording mock store: tracks which indices exist and every call made.
    struct MockStore {
        indices: Mutex<HashSet<String>>,
        create_calls: Mutex<Vec<String>>,
        exists_calls: Mutex<usize>,
        bulk_calls: Mutex<Vec<Vec<WriteAction>>>,
        search_calls: Mutex<Vec<(Query, u64, u64)>>,
        fail_after_bulk_calls: Option<usize>,
        search_result: Vec<SearchHit>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                indices: Mutex::new(HashSet::new()),
                create_calls: Mutex::new(Vec::new()),
                exists_calls: Mutex::new(0),
                bulk_calls: Mutex::new(Vec::new()),
                search_calls: Mutex::new(Vec::new()),
                fail_after_bulk_calls: None,
                search_result: Vec::new(),
            }
        }

        fn with_index(index: &str) -> Self {
            let store = Self::new();
            store.indices.lock().unwrap().insert(index.to_string());
            store
        }

        fn bulk_calls(&self) -> Vec<Vec<WriteAction>> {
            self.bulk_calls.lock().unwrap().clone()
        }

        fn create_calls(&self) -> Vec<String> {
            self.create_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn exists_index(&self, index: &str) -> Result<bool, SyncError> {
            *self.exists_calls.lock().unwrap() += 1;
            Ok(self.indices.lock().unwrap().contains(index))
        }

        async fn create_index(&self, index: &str) -> Result<(), SyncError> {
            self.create_calls.lock().unwrap().push(index.to_string());
            self.indices.lock().unwrap().insert(index.to_string());
            Ok(())
        }

        async fn delete_index(&self, index: &str) -> Result<(), SyncError> {
            if self.indices.lock().unwrap().remove(index) {
                Ok(())
            } else {
                Err(SyncError::index_not_found(index))
            }
        }

        async fn bulk_write(&self, actions: &[WriteAction]) -> Result<(), SyncError> {
            let mut calls = self.bulk_calls.lock().unwrap();
            if let Some(limit) = self.fail_after_bulk_calls {
                if calls.len() >= limit {
                    return Err(SyncError::bulk_write("store rejected the batch"));
                }
            }
            calls.push(actions.to_vec());
            Ok(())
        }

        async fn count(
            &self,
            _index: &str,
            _doc_type: &str,
            _query: &Query,
        ) -> Result<u64, SyncError> {
            Ok(0)
        }

        async fn search(
            &self,
            _index: &str,
            _doc_type: &str,
            query: &Query,
            offset: u64,
            limit: u64,
        ) -> Result<Vec<SearchHit>, SyncError> {
            self.search_calls
                .lock()
                .unwrap()
                .push((query.clone(), offset, limit));
            Ok(self.search_result.clone())
        }
    }

    fn doc(seq: usize) -> Document {
        let mut map = Document::new();
        map.insert("seq".to_string(), json!(seq));
        map
    }

    fn docs(count: usize) -> Vec<Document> {
        (0..count).map(doc).collect()
    }

    #[tokio::test]
    async fn insert_splits_into_bounded_batches_in_order() {
        let store = Arc::new(MockStore::with_index("docs"));
        let service = CorpusSyncService::new(store.clone());

        service.insert_all("docs", "t", docs(2500)).await.unwrap();

        let calls = store.bulk_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].len(), 1000);
        assert_eq!(calls[1].len(), 1000);
        assert_eq!(calls[2].len(), 500);

        // Flattened actions reproduce the input collection in order.
        let flattened: Vec<&WriteAction> = calls.iter().flatten().collect();
        assert_eq!(flattened.len(), 2500);
        for (seq, action) in flattened.iter().enumerate() {
            assert_eq!(action.op, WriteOp::Index);
            assert_eq!(action.index, "docs");
            assert_eq!(action.doc_type, "t");
            assert!(action.id.is_none());
            assert_eq!(action.source, doc(seq));
        }
    }

    #[tokio::test]
    async fn insert_empty_ensures_index_but_writes_nothing() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        service.insert_all("docs", "t", Vec::new()).await.unwrap();

        assert!(store.bulk_calls().is_empty());
        assert_eq!(store.create_calls(), vec!["docs".to_string()]);
    }

    #[tokio::test]
    async fn insert_respects_custom_batch_size() {
        let store = Arc::new(MockStore::with_index("docs"));
        let service =
            CorpusSyncService::with_config(store.clone(), SyncConfig::with_batch_size(100));

        service.insert_all("docs", "t", docs(250)).await.unwrap();

        let sizes: Vec<usize> = store.bulk_calls().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn insert_aborts_on_first_failed_batch() {
        let mut store = MockStore::with_index("docs");
        store.fail_after_bulk_calls = Some(1);
        let store = Arc::new(store);
        let service = CorpusSyncService::new(store.clone());

        let err = service
            .insert_all("docs", "t", docs(2500))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::BulkWrite(_)));
        // Only the first batch went through; nothing after the failure.
        assert_eq!(store.bulk_calls().len(), 1);
    }

    #[tokio::test]
    async fn ensure_creates_only_once() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        service.ensure_index_exists("docs").await.unwrap();
        service.ensure_index_exists("docs").await.unwrap();

        assert_eq!(store.create_calls(), vec!["docs".to_string()]);
        assert_eq!(*store.exists_calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn exists_never_creates() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        assert!(!service.exists("docs").await.unwrap());
        assert!(store.create_calls().is_empty());
    }

    #[tokio::test]
    async fn empty_index_name_is_rejected() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        let err = service.insert_all("", "t", docs(1)).await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));

        let err = service.exists("").await.unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
    }

    #[tokio::test]
    async fn update_tags_every_action_with_its_id() {
        let store = Arc::new(MockStore::with_index("docs"));
        let service = CorpusSyncService::new(store.clone());

        let replacements = vec![
            ("a-1".to_string(), doc(10)),
            ("a-2".to_string(), doc(20)),
        ];
        service.update_all("docs", "t", replacements).await.unwrap();

        let calls = store.bulk_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].id.as_deref(), Some("a-1"));
        assert_eq!(calls[0][1].id.as_deref(), Some("a-2"));
        assert_eq!(calls[0][0].source, doc(10));
    }

    #[tokio::test]
    async fn update_batches_like_insert() {
        let store = Arc::new(MockStore::with_index("docs"));
        let service =
            CorpusSyncService::with_config(store.clone(), SyncConfig::with_batch_size(100));

        let replacements: Vec<(DocumentId, Document)> = (0..250)
            .map(|n| (format!("id-{}", n), doc(n)))
            .collect();
        service.update_all("docs", "t", replacements).await.unwrap();

        let sizes: Vec<usize> = store.bulk_calls().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn update_empty_makes_no_store_calls() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        service.update_all("docs", "t", Vec::new()).await.unwrap();

        assert!(store.bulk_calls().is_empty());
        assert_eq!(*store.exists_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn find_by_field_sends_term_query_with_limit_one() {
        let mut store = MockStore::with_index("docs");
        store.search_result = vec![SearchHit::new("m-7", doc(7))];
        let store = Arc::new(store);
        let service = CorpusSyncService::new(store.clone());

        let found = service
            .find_by_field("docs", "t", "seq", 7)
            .await
            .unwrap()
            .expect("hit expected");

        assert_eq!(found.0, "m-7");
        assert_eq!(found.1, doc(7));

        let calls = store.search_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Query::term("seq", 7));
        assert_eq!((calls[0].1, calls[0].2), (0, 1));
    }

    #[tokio::test]
    async fn delete_missing_index_reports_not_found() {
        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        let err = service.delete_index("ghost").await.unwrap_err();
        assert!(matches!(err, SyncError::IndexNotFound(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn read_all_rejects_empty_index_name_lazily() {
        use futures::TryStreamExt;

        let store = Arc::new(MockStore::new());
        let service = CorpusSyncService::new(store.clone());

        let result: Result<Vec<_>, _> = service.read_all("", "t").try_collect().await;
        assert!(matches!(result.unwrap_err(), SyncError::Validation(_)));
    }
}

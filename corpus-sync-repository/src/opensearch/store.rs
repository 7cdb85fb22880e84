//! OpenSearch document store implementation.
//!
//! This module provides the concrete implementation of `DocumentStore` using
//! the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, CountParts, OpenSearch, SearchParts,
};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};
use url::Url;

use corpus_sync_shared::{Query, SearchHit, WriteAction, WriteOp, DEFAULT_DOC_TYPE};

use crate::errors::SyncError;
use crate::interfaces::DocumentStore;

/// OpenSearch document store implementation.
///
/// Owns a single transport handle, constructed once per logical connection
/// and shared by every operation made through it. Requests are issued one at
/// a time by the sync engine; this type adds no locking of its own.
///
/// # Example
///
/// ```ignore
/// let store = OpenSearchStore::new("http://localhost:9200").await?;
/// let exists = store.exists_index("books").await?;
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
}

impl OpenSearchStore {
    /// Create a new store connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A new store instance
    /// * `Err(SyncError::Connection)` - If transport setup fails
    pub async fn new(url: &str) -> Result<Self, SyncError> {
        let parsed_url = Url::parse(url).map_err(|e| SyncError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch document store");

        Ok(Self { client })
    }

    /// Build the metadata line for one bulk action.
    ///
    /// The legacy `_type` label is emitted only when it differs from the
    /// default; single-type clusters reject unknown metadata fields, while
    /// legacy multi-type clusters route on it.
    fn action_metadata(action: &WriteAction) -> Value {
        let mut meta = Map::new();
        meta.insert("_index".to_string(), Value::String(action.index.clone()));
        if !action.doc_type.is_empty() && action.doc_type != DEFAULT_DOC_TYPE {
            meta.insert("_type".to_string(), Value::String(action.doc_type.clone()));
        }
        if let Some(id) = &action.id {
            meta.insert("_id".to_string(), Value::String(id.clone()));
        }

        let mut line = Map::new();
        line.insert(action.op.as_str().to_string(), Value::Object(meta));
        Value::Object(line)
    }

    /// Render write actions into the alternating metadata/source line layout
    /// of the store's bulk protocol.
    fn bulk_body_lines(actions: &[WriteAction]) -> Vec<Value> {
        let mut lines = Vec::with_capacity(actions.len() * 2);
        for action in actions {
            lines.push(Self::action_metadata(action));
            match action.op {
                WriteOp::Delete => {}
                WriteOp::Update => lines.push(json!({ "doc": action.source.clone() })),
                WriteOp::Index | WriteOp::Create => {
                    lines.push(Value::Object(action.source.clone()))
                }
            }
        }
        lines
    }

    /// Summarize per-action failures from a bulk response body.
    ///
    /// Returns `None` when every action succeeded.
    fn bulk_failures(response_body: &Value) -> Option<String> {
        if !response_body["errors"].as_bool().unwrap_or(false) {
            return None;
        }

        let empty = Vec::new();
        let items = response_body["items"].as_array().unwrap_or(&empty);
        let mut failed = 0usize;
        let mut first_reason: Option<String> = None;
        for item in items {
            let Some(result) = item.as_object().and_then(|wrapper| wrapper.values().next()) else {
                continue;
            };
            if let Some(err) = result.get("error") {
                failed += 1;
                if first_reason.is_none() {
                    first_reason = Some(
                        err["reason"]
                            .as_str()
                            .unwrap_or("unknown reason")
                            .to_string(),
                    );
                }
            }
        }

        Some(format!(
            "{} of {} actions failed, first: {}",
            failed,
            items.len(),
            first_reason.unwrap_or_else(|| "unknown reason".to_string())
        ))
    }
}

#[async_trait]
impl DocumentStore for OpenSearchStore {
    async fn exists_index(&self, index: &str) -> Result<bool, SyncError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            debug!(index = %index, "Index exists");
            return Ok(true);
        }
        if status.as_u16() == 404 {
            debug!(index = %index, "Index does not exist");
            return Ok(false);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Exists request failed");
        Err(SyncError::unclassified(format!(
            "exists check failed with status {}: {}",
            status, body
        )))
    }

    async fn create_index(&self, index: &str) -> Result<(), SyncError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Created index");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        // Index creation is idempotent: an already-exists response is success.
        if body.contains("resource_already_exists_exception")
            || body.contains("index_already_exists_exception")
        {
            debug!(index = %index, "Index already exists");
            return Ok(());
        }

        error!(status = %status, body = %body, "Create index request failed");
        Err(SyncError::index_creation(format!(
            "create failed with status {}: {}",
            status, body
        )))
    }

    async fn delete_index(&self, index: &str) -> Result<(), SyncError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Deleted index");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Delete index request failed");
        Err(SyncError::classify_status(
            "delete index",
            status.as_u16(),
            &body,
        ))
    }

    async fn bulk_write(&self, actions: &[WriteAction]) -> Result<(), SyncError> {
        if actions.is_empty() {
            return Ok(());
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_body_lines(actions)
            .into_iter()
            .map(Into::into)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Bulk request failed");
            return Err(SyncError::classify_status(
                "bulk write",
                status.as_u16(),
                &body,
            ));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SyncError::parse(e.to_string()))?;

        if let Some(summary) = Self::bulk_failures(&response_body) {
            error!(summary = %summary, "Bulk request reported action failures");
            return Err(SyncError::bulk_write(summary));
        }

        debug!(actions = actions.len(), "Bulk request accepted");
        Ok(())
    }

    /// Single-type stores address the index only; the legacy type label does
    /// not affect count routing.
    async fn count(
        &self,
        index: &str,
        _doc_type: &str,
        query: &Query,
    ) -> Result<u64, SyncError> {
        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .body(json!({ "query": query.to_dsl() }))
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Count request failed");
            return Err(SyncError::classify_status("count", status.as_u16(), &body));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SyncError::parse(e.to_string()))?;

        response_body["count"]
            .as_u64()
            .ok_or_else(|| SyncError::parse("count response missing numeric count"))
    }

    async fn search(
        &self,
        index: &str,
        _doc_type: &str,
        query: &Query,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<SearchHit>, SyncError> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .from(offset as i64)
            .size(limit as i64)
            .body(json!({ "query": query.to_dsl(), "track_total_hits": true }))
            .send()
            .await
            .map_err(|e| SyncError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Search request failed");
            return Err(SyncError::classify_status("search", status.as_u16(), &body));
        }

        let response_body = response
            .json::<Value>()
            .await
            .map_err(|e| SyncError::parse(e.to_string()))?;

        let raw_hits = response_body["hits"]["hits"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut hits = Vec::with_capacity(raw_hits.len());
        for raw in raw_hits {
            let id = raw["_id"]
                .as_str()
                .ok_or_else(|| SyncError::parse("search hit missing _id"))?
                .to_string();
            let source = match raw.get("_source") {
                Some(Value::Object(map)) => map.clone(),
                _ => return Err(SyncError::parse("search hit missing object _source")),
            };
            hits.push(SearchHit { id, source });
        }

        debug!(index = %index, offset, returned = hits.len(), "Fetched search page");
        Ok(hits)
    }
}

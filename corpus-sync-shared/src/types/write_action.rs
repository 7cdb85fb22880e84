//! Bulk write action types.
//!
//! A bulk request bundles many individual write actions into one store call.
//! Each action names the operation kind, the target index, the document type
//! label, an optional document id, and the source document.

use serde::{Deserialize, Serialize};

use crate::types::document::{Document, DocumentId};

/// Operation kind of a single bulk write action.
///
/// These mirror the operation kinds of the store's bulk protocol. The sync
/// engine itself only emits [`WriteOp::Index`] (upsert semantics: the store
/// assigns an id unless one is supplied), the remaining kinds are part of the
/// store contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOp {
    /// Index the source document, replacing any existing document with the
    /// same id.
    Index,
    /// Create the document, failing if the id already exists.
    Create,
    /// Partially update an existing document.
    Update,
    /// Delete the document with the given id; carries no source.
    Delete,
}

impl WriteOp {
    /// The wire name of this operation in the store's bulk protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOp::Index => "index",
            WriteOp::Create => "create",
            WriteOp::Update => "update",
            WriteOp::Delete => "delete",
        }
    }
}

/// A single write within a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteAction {
    /// Operation kind.
    pub op: WriteOp,
    /// Target index name.
    pub index: String,
    /// Document type label, passed through to the store unchanged.
    pub doc_type: String,
    /// Document id; `None` lets the store assign one.
    pub id: Option<DocumentId>,
    /// The document body. Ignored by the store for [`WriteOp::Delete`].
    pub source: Document,
}

impl WriteAction {
    /// Create an index action without an explicit id.
    pub fn index(index: impl Into<String>, doc_type: impl Into<String>, source: Document) -> Self {
        Self {
            op: WriteOp::Index,
            index: index.into(),
            doc_type: doc_type.into(),
            id: None,
            source,
        }
    }

    /// Create an index action targeting an existing document id.
    pub fn index_with_id(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<DocumentId>,
        source: Document,
    ) -> Self {
        Self {
            op: WriteOp::Index,
            index: index.into(),
            doc_type: doc_type.into(),
            id: Some(id.into()),
            source,
        }
    }
}

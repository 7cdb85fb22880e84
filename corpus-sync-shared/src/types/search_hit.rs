//! Search hit types returned from paged retrieval.

use crate::types::document::{Document, DocumentId};

/// A single document returned from a search page.
///
/// Pairs the store-assigned id with the source document exactly as the store
/// returned it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The store-assigned document id.
    pub id: DocumentId,
    /// The source document.
    pub source: Document,
}

impl SearchHit {
    /// Create a new hit.
    pub fn new(id: impl Into<DocumentId>, source: Document) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

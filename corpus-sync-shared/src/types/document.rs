//! Document types for the corpus sync system.
//!
//! Documents are opaque JSON objects owned by the caller until ingestion and
//! by the store afterwards. The engine never inspects document fields.

use serde_json::{Map, Value};

/// A document as exchanged with the search index.
///
/// Field order is preserved (the `preserve_order` feature of `serde_json`),
/// so a document round-trips through import and export without reshuffling
/// its fields.
pub type Document = Map<String, Value>;

/// Store-assigned identifier of a document within an index.
pub type DocumentId = String;

/// The default document type label.
///
/// Document types are a legacy multi-type concept; single-type stores collapse
/// everything onto this label.
pub const DEFAULT_DOC_TYPE: &str = "_doc";

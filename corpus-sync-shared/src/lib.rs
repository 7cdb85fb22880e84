//! # Corpus Sync Shared
//!
//! This crate defines shared data structures and types used across the corpus
//! sync ecosystem. It includes the document model, bulk write actions, the
//! minimal query model, and search hit types exchanged with the store layer.

pub mod types;

pub use types::document::{Document, DocumentId, DEFAULT_DOC_TYPE};
pub use types::query::Query;
pub use types::search_hit::SearchHit;
pub use types::write_action::{WriteAction, WriteOp};

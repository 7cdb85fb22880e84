//! # Corpus Sync Repository
//!
//! This crate provides the chunked bulk-transfer engine for synchronizing
//! document corpora with a search index. It includes the abstract
//! [`DocumentStore`] interface, a concrete OpenSearch implementation, the
//! [`CorpusSyncService`] batching/export engine, and the unified error type.

pub mod config;
pub mod errors;
pub mod export;
pub mod interfaces;
pub mod opensearch;
pub mod service;

pub use config::SyncConfig;
pub use errors::SyncError;
pub use export::DocumentStream;
pub use interfaces::DocumentStore;
pub use opensearch::OpenSearchStore;
pub use service::CorpusSyncService;

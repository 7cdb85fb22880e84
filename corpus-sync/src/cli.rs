//! Command-line definition for the corpus sync CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use corpus_sync_shared::DEFAULT_DOC_TYPE;

/// Batch import/export between JSON corpora and a search index.
#[derive(Debug, Parser)]
#[command(name = "corpus-sync", version, about)]
pub struct Cli {
    /// Search index server URL.
    #[arg(long, env = "OPENSEARCH_URL", default_value = "http://localhost:9200")]
    pub url: String,

    /// Documents per bulk batch and per export page.
    #[arg(long, env = "SYNC_BATCH_SIZE", default_value_t = 1000)]
    pub batch_size: usize,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per sync operation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bulk-load a JSON array file into an index, creating it if needed.
    Import {
        /// Target index name.
        index: String,
        /// Path to a JSON file holding an array of objects.
        file: PathBuf,
        /// Document type label.
        #[arg(long, default_value = DEFAULT_DOC_TYPE)]
        doc_type: String,
    },
    /// Stream an index's full contents as NDJSON on stdout.
    Export {
        /// Index to export.
        index: String,
        /// Document type label.
        #[arg(long, default_value = DEFAULT_DOC_TYPE)]
        doc_type: String,
    },
    /// Print the number of documents in an index.
    Count {
        /// Index to count.
        index: String,
        /// Document type label.
        #[arg(long, default_value = DEFAULT_DOC_TYPE)]
        doc_type: String,
    },
    /// Check whether an index exists; prints "true" or "false".
    Exists {
        /// Index to check.
        index: String,
    },
    /// Delete an index and all documents in it.
    DeleteIndex {
        /// Index to delete.
        index: String,
    },
}

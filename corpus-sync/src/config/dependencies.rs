//! Dependency initialization and wiring for the corpus sync CLI.

use std::sync::Arc;

use tracing::info;

use corpus_sync_repository::{CorpusSyncService, OpenSearchStore, SyncConfig};

use crate::errors::CliError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured sync service ready to run commands against.
    pub service: CorpusSyncService,
}

impl Dependencies {
    /// Initialize all dependencies.
    ///
    /// Connection is fail-fast: a store that cannot be reached surfaces as a
    /// fatal error instead of being retried.
    ///
    /// # Arguments
    ///
    /// * `url` - Search index server URL
    /// * `batch_size` - Documents per bulk batch and per export page
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(CliError)` - If the configuration is invalid or the transport
    ///   cannot be constructed
    pub async fn new(url: &str, batch_size: usize) -> Result<Self, CliError> {
        if batch_size == 0 {
            return Err(CliError::config("batch size must be positive"));
        }

        info!(url = %url, batch_size, "Initializing dependencies");

        let store = OpenSearchStore::new(url).await?;
        let service = CorpusSyncService::with_config(
            Arc::new(store),
            SyncConfig::with_batch_size(batch_size),
        );

        Ok(Self { service })
    }
}

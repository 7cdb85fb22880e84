//! Configuration types for the CorpusSyncService.

/// Default number of documents per bulk batch and per export page.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for the [`crate::CorpusSyncService`].
///
/// The batch size bounds both directions of a transfer: bulk writes are split
/// into chunks of at most `batch_size` actions, and exports fetch pages of at
/// most `batch_size` documents.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum number of documents per bulk-write call and per export page.
    pub batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SyncConfig {
    /// Create a config with a custom batch size.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero; a zero-sized batch can make no
    /// progress.
    pub fn with_batch_size(batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be positive");
        Self { batch_size }
    }
}

//! Lazy full-corpus export.
//!
//! Walks an index page by page, yielding one `(id, document)` pair at a time.
//! Pages are fetched only when the consumer has drained the previous one, so
//! dropping the stream early stops all further store traffic.

use std::collections::VecDeque;
use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tracing::debug;

use corpus_sync_shared::{Document, DocumentId, Query, SearchHit};

use crate::errors::SyncError;
use crate::interfaces::DocumentStore;

/// A lazy sequence of `(id, document)` pairs covering an entire index.
///
/// Not restartable: consuming it again requires a fresh
/// [`crate::CorpusSyncService::read_all`] call, which re-counts and re-walks
/// the index from the start.
pub type DocumentStream = BoxStream<'static, Result<(DocumentId, Document), SyncError>>;

/// Pagination cursor state. Transitions strictly forward; there is no rewind
/// and no seek.
enum ExportState {
    /// Nothing fetched yet; the existence check and count happen on the
    /// first poll.
    NotStarted,
    /// Walking pages; `buffered` holds the rest of the current page.
    Paging {
        next_page: u64,
        total_pages: u64,
        buffered: VecDeque<SearchHit>,
    },
    /// All pages consumed.
    Exhausted,
}

/// Build the export stream over `index`.
///
/// A missing index ends the stream immediately with no count or search
/// calls: an absent corpus is "nothing to read", not an error.
pub(crate) fn export_stream(
    store: Arc<dyn DocumentStore>,
    index: String,
    doc_type: String,
    page_size: u64,
) -> DocumentStream {
    stream::try_unfold(ExportState::NotStarted, move |mut state| {
        let store = store.clone();
        let index = index.clone();
        let doc_type = doc_type.clone();
        async move {
            loop {
                match state {
                    ExportState::NotStarted => {
                        if !store.exists_index(&index).await? {
                            debug!(index = %index, "Index absent, nothing to export");
                            state = ExportState::Exhausted;
                            continue;
                        }
                        let total = store.count(&index, &doc_type, &Query::MatchAll).await?;
                        let total_pages = total.div_ceil(page_size);
                        debug!(index = %index, total, total_pages, "Starting export");
                        state = ExportState::Paging {
                            next_page: 0,
                            total_pages,
                            buffered: VecDeque::new(),
                        };
                    }
                    ExportState::Paging {
                        next_page,
                        total_pages,
                        mut buffered,
                    } => {
                        if let Some(hit) = buffered.pop_front() {
                            let next = ExportState::Paging {
                                next_page,
                                total_pages,
                                buffered,
                            };
                            return Ok(Some(((hit.id, hit.source), next)));
                        }
                        if next_page >= total_pages {
                            state = ExportState::Exhausted;
                            continue;
                        }
                        let offset = next_page * page_size;
                        let hits = store
                            .search(&index, &doc_type, &Query::MatchAll, offset, page_size)
                            .await?;
                        debug!(index = %index, page = next_page, returned = hits.len(), "Fetched export page");
                        if hits.is_empty() {
                            // The corpus shrank under us; stop instead of
                            // fetching further guaranteed-empty pages.
                            state = ExportState::Exhausted;
                            continue;
                        }
                        state = ExportState::Paging {
                            next_page: next_page + 1,
                            total_pages,
                            buffered: hits.into(),
                        };
                    }
                    ExportState::Exhausted => return Ok(None),
                }
            }
        }
    })
    .boxed()
}

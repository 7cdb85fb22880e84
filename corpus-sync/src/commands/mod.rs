//! Command implementations for the corpus sync CLI.
//!
//! Each function maps one subcommand onto the sync service. Human-readable
//! progress goes to the log (stderr); command output proper (exported
//! documents, counts, existence answers) goes to stdout.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use futures::TryStreamExt;
use serde_json::json;
use tracing::{info, instrument};

use corpus_sync_repository::CorpusSyncService;
use corpus_sync_shared::Document;

use crate::errors::CliError;

/// Bulk-load a JSON array file into an index.
///
/// The file must hold a single JSON array of objects. A missing file is a
/// fatal error; an unreadable or malformed file is an ordinary one.
#[instrument(skip(service))]
pub async fn import(
    service: &CorpusSyncService,
    index: &str,
    doc_type: &str,
    file: &Path,
) -> Result<(), CliError> {
    if !file.exists() {
        return Err(CliError::MissingInput(file.to_path_buf()));
    }

    let reader = BufReader::new(File::open(file).map_err(|e| CliError::io(e.to_string()))?);
    let documents: Vec<Document> = serde_json::from_reader(reader).map_err(|e| {
        CliError::invalid_input(format!(
            "{} is not a JSON array of objects: {}",
            file.display(),
            e
        ))
    })?;

    let count = documents.len();
    service.insert_all(index, doc_type, documents).await?;

    info!(index = %index, count, "Imported corpus");
    Ok(())
}

/// Stream an index's full contents to stdout, one JSON object per line.
///
/// Each line pairs the store-assigned id with the source document:
/// `{"_id": "...", "_source": {...}}`.
#[instrument(skip(service))]
pub async fn export(
    service: &CorpusSyncService,
    index: &str,
    doc_type: &str,
) -> Result<(), CliError> {
    let mut stream = service.read_all(index, doc_type);
    let mut exported = 0u64;

    while let Some((id, doc)) = stream.try_next().await? {
        let line = serde_json::to_string(&json!({ "_id": id, "_source": doc }))
            .map_err(|e| CliError::serialization(e.to_string()))?;
        println!("{}", line);
        exported += 1;
    }

    info!(index = %index, exported, "Export complete");
    Ok(())
}

/// Print the number of documents in an index.
pub async fn count(
    service: &CorpusSyncService,
    index: &str,
    doc_type: &str,
) -> Result<(), CliError> {
    let total = service.count_documents(index, doc_type).await?;
    println!("{}", total);
    Ok(())
}

/// Print whether an index exists.
pub async fn exists(service: &CorpusSyncService, index: &str) -> Result<(), CliError> {
    let present = service.exists(index).await?;
    println!("{}", present);
    Ok(())
}

/// Delete an index and all documents in it.
pub async fn delete_index(service: &CorpusSyncService, index: &str) -> Result<(), CliError> {
    service.delete_index(index).await?;
    info!(index = %index, "Index deleted");
    Ok(())
}

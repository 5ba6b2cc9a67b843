//! Store file bootstrap utilities.
//!
//! # Responsibility
//! - Create the store file with seed data when it does not exist yet.
//! - Load and validate the document before handing it to repositories.
//! - Persist documents atomically.
//!
//! # Invariants
//! - Returned documents passed `StoreDocument::check_invariants`.
//! - A failed save leaves the previous file content untouched.

use super::document::{DocumentOnDisk, StoreDocument};
use super::seed::seed_document;
use super::{StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Creates the store file with seed records if it is missing.
///
/// Returns `true` when a new file was written.
pub fn ensure_store_file(path: impl AsRef<Path>) -> StoreResult<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }

    let document = seed_document()?;
    save_store(path, &document)?;
    info!(
        "event=store_seed module=store status=ok records={}",
        document.interns.len()
    );
    Ok(true)
}

/// Opens the store file, seeding it first when absent, and loads the document.
///
/// # Side effects
/// - May create parent directories and the store file.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StoreResult<StoreDocument> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_open module=store status=start");

    match ensure_store_file(path).and_then(|_| load_document(path)) {
        Ok(document) => {
            info!(
                "event=store_open module=store status=ok records={} next_sequence={} duration_ms={}",
                document.interns.len(),
                document.next_sequence,
                started_at.elapsed().as_millis()
            );
            Ok(document)
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Writes the document to `path` through a sibling temp file and rename.
pub fn save_store(path: impl AsRef<Path>, document: &StoreDocument) -> StoreResult<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;

    let encoded = serde_json::to_vec_pretty(document).map_err(StoreError::Encode)?;
    let mut temp = NamedTempFile::new_in(parent).map_err(|source| io_error(parent, source))?;
    temp.write_all(&encoded)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|source| io_error(temp.path(), source))?;
    temp.persist(path)
        .map_err(|err| io_error(path, err.error))?;
    Ok(())
}

fn load_document(path: &Path) -> StoreResult<StoreDocument> {
    let bytes = fs::read(path).map_err(|source| io_error(path, source))?;
    let on_disk: DocumentOnDisk =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut document = StoreDocument::from(on_disk);
    document.reconcile_sequence();
    document.check_invariants()?;
    Ok(document)
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

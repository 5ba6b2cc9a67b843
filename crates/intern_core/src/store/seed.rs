//! Seed records written on first run.

use super::document::{DocumentOnDisk, StoreDocument};
use super::{StoreError, StoreResult};

const SEED_JSON: &str = include_str!("seed.json");

/// Returns the seed document bundled with the binary.
pub fn seed_document() -> StoreResult<StoreDocument> {
    let on_disk: DocumentOnDisk = serde_json::from_str(SEED_JSON)
        .map_err(|err| StoreError::InvalidData(format!("bundled seed data: {err}")))?;
    let document = StoreDocument::from(on_disk);
    document.check_invariants()?;
    Ok(document)
}

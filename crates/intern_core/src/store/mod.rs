//! JSON file storage bootstrap and document I/O.
//!
//! # Responsibility
//! - Make sure the store file exists, seeding it on first run.
//! - Load and atomically save the single JSON document holding all records.
//!
//! # Invariants
//! - A loaded document always satisfies id/email uniqueness; violations are
//!   reported as `StoreError::InvalidData`, never repaired silently.
//! - `next_sequence` is always greater than every persisted id suffix.
//! - Writes replace the file via temp-file + rename, never in place.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod document;
mod open;
pub mod seed;

pub use document::StoreDocument;
pub use open::{ensure_store_file, open_store, save_store};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store file `{}` i/o failed: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "store file `{}` is not valid: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode store document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted intern data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

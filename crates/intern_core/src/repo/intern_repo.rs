//! Intern repository contracts and JSON-document implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the intern record collection.
//! - Own id allocation through the document's monotonic sequence counter.
//!
//! # Invariants
//! - A mutation is written to disk before it becomes visible in memory; a
//!   failed write leaves the in-memory document unchanged.
//! - `list_interns` returns records in insertion order.
//! - Allocated ids are never reused, even after deletes.

use crate::model::intern::{InternId, InternRecord};
use crate::store::{open_store, save_store, StoreDocument, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for intern persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound(InternId),
    DuplicateId(InternId),
    DuplicateEmail(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "intern not found: {id}"),
            Self::DuplicateId(id) => write!(f, "intern id already exists: {id}"),
            Self::DuplicateEmail(_) => write!(f, "an intern with this email already exists"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for intern CRUD operations.
pub trait InternRepository {
    /// Reserves the next `INT-NNN` id.
    fn allocate_id(&mut self) -> InternId;
    fn insert_intern(&mut self, record: &InternRecord) -> RepoResult<()>;
    fn update_intern(&mut self, record: &InternRecord) -> RepoResult<()>;
    fn get_intern(&self, id: &InternId) -> RepoResult<Option<InternRecord>>;
    /// Case-insensitive email lookup.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<InternRecord>>;
    fn list_interns(&self) -> RepoResult<Vec<InternRecord>>;
    fn delete_intern(&mut self, id: &InternId) -> RepoResult<InternRecord>;
}

/// Intern repository over a single JSON document.
///
/// File-backed when opened with [`JsonInternRepository::open`]; purely
/// in-memory when built with [`JsonInternRepository::in_memory`].
#[derive(Debug)]
pub struct JsonInternRepository {
    path: Option<PathBuf>,
    document: StoreDocument,
}

impl JsonInternRepository {
    /// Opens (and seeds, if missing) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let document = open_store(path)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            document,
        })
    }

    /// Builds a repository that never touches the filesystem.
    pub fn in_memory(mut document: StoreDocument) -> RepoResult<Self> {
        document.reconcile_sequence();
        document.check_invariants()?;
        Ok(Self {
            path: None,
            document,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn next_sequence(&self) -> u32 {
        self.document.next_sequence
    }

    fn position(&self, id: &InternId) -> Option<usize> {
        self.document
            .interns
            .iter()
            .position(|record| &record.id == id)
    }

    fn email_taken_by_other(&self, email: &str, id: &InternId) -> bool {
        self.document
            .interns
            .iter()
            .any(|record| &record.id != id && record.has_email(email))
    }

    fn commit(&mut self, next: StoreDocument) -> RepoResult<()> {
        if let Some(path) = &self.path {
            save_store(path, &next)?;
        }
        self.document = next;
        Ok(())
    }
}

impl InternRepository for JsonInternRepository {
    fn allocate_id(&mut self) -> InternId {
        let id = InternId::from_sequence(self.document.next_sequence);
        self.document.next_sequence = self.document.next_sequence.saturating_add(1);
        id
    }

    fn insert_intern(&mut self, record: &InternRecord) -> RepoResult<()> {
        if self.position(&record.id).is_some() {
            return Err(RepoError::DuplicateId(record.id.clone()));
        }
        if self.email_taken_by_other(&record.email, &record.id) {
            return Err(RepoError::DuplicateEmail(record.email.clone()));
        }

        let mut next = self.document.clone();
        next.interns.push(record.clone());
        next.reconcile_sequence();
        self.commit(next)
    }

    fn update_intern(&mut self, record: &InternRecord) -> RepoResult<()> {
        let index = self
            .position(&record.id)
            .ok_or_else(|| RepoError::NotFound(record.id.clone()))?;
        if self.email_taken_by_other(&record.email, &record.id) {
            return Err(RepoError::DuplicateEmail(record.email.clone()));
        }

        let mut next = self.document.clone();
        next.interns[index] = record.clone();
        self.commit(next)
    }

    fn get_intern(&self, id: &InternId) -> RepoResult<Option<InternRecord>> {
        Ok(self.position(id).map(|index| self.document.interns[index].clone()))
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<InternRecord>> {
        Ok(self
            .document
            .interns
            .iter()
            .find(|record| record.has_email(email))
            .cloned())
    }

    fn list_interns(&self) -> RepoResult<Vec<InternRecord>> {
        Ok(self.document.interns.clone())
    }

    fn delete_intern(&mut self, id: &InternId) -> RepoResult<InternRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))?;

        let mut next = self.document.clone();
        let removed = next.interns.remove(index);
        self.commit(next)?;
        Ok(removed)
    }
}

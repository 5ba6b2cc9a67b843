//! Persisted document shape.
//!
//! # Invariants
//! - `interns` keeps insertion order; list defaults rely on it.
//! - `next_sequence` only grows, so deleted ids are never handed out again.

use crate::model::intern::InternRecord;
use crate::store::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whole-store JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    /// Sequence number for the next allocated `INT-NNN` id.
    pub next_sequence: u32,
    pub interns: Vec<InternRecord>,
}

/// Accepted on-disk layouts. Older files hold a bare record array.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DocumentOnDisk {
    Current(StoreDocument),
    Legacy(Vec<InternRecord>),
}

impl From<DocumentOnDisk> for StoreDocument {
    fn from(value: DocumentOnDisk) -> Self {
        match value {
            DocumentOnDisk::Current(document) => document,
            DocumentOnDisk::Legacy(interns) => StoreDocument::from_records(interns),
        }
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            next_sequence: 1,
            interns: Vec::new(),
        }
    }
}

impl StoreDocument {
    /// Builds a document whose counter follows the highest existing id.
    pub fn from_records(interns: Vec<InternRecord>) -> Self {
        let mut document = Self {
            next_sequence: 1,
            interns,
        };
        document.reconcile_sequence();
        document
    }

    /// Raises `next_sequence` above every stored id suffix.
    pub fn reconcile_sequence(&mut self) {
        let floor = self
            .interns
            .iter()
            .map(|record| record.id.sequence().saturating_add(1))
            .max()
            .unwrap_or(1);
        self.next_sequence = self.next_sequence.max(floor).max(1);
    }

    /// Verifies id and email uniqueness across all records.
    pub fn check_invariants(&self) -> StoreResult<()> {
        let mut ids = HashSet::new();
        let mut emails = HashSet::new();
        for record in &self.interns {
            if !ids.insert(record.id.as_str()) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate intern id `{}`",
                    record.id
                )));
            }
            if !emails.insert(record.email.trim().to_ascii_lowercase()) {
                return Err(StoreError::InvalidData(format!(
                    "duplicate email on intern `{}`",
                    record.id
                )));
            }
            if record.id.sequence() >= self.next_sequence {
                return Err(StoreError::InvalidData(format!(
                    "intern `{}` is not below next sequence {}",
                    record.id, self.next_sequence
                )));
            }
        }
        Ok(())
    }
}

//! Domain model for intern records.
//!
//! # Responsibility
//! - Define the canonical persisted record and its identifier/enumerations.
//! - Define the raw candidate/patch shape accepted from callers.
//! - Own field-level validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable `InternId` (`INT-NNN`).
//! - Validation is pure and never touches storage.

pub mod draft;
pub mod intern;
pub mod validation;

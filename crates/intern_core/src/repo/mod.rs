//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for intern records.
//! - Isolate JSON document details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce id/email uniqueness before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateEmail`) in
//!   addition to storage errors.

pub mod intern_repo;

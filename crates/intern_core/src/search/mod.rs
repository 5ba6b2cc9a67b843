//! Intern list filtering, sorting and pagination.
//!
//! # Responsibility
//! - Match records against search/status/department filters.
//! - Order and page matching records deterministically.

pub mod filter;

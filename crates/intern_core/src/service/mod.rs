//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and repository calls into use-case level APIs.
//! - Compute response-time projections (derived fields, dashboard stats).
//! - Keep the HTTP layer decoupled from storage details.

pub mod dashboard;
pub mod derive;
pub mod intern_service;

//! Core domain logic for the intern tracker.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::draft::InternDraft;
pub use model::intern::{Department, InternId, InternIdError, InternRecord, InternStatus};
pub use model::validation::{parse_draft, validate, FieldViolation, ParsedDraft, ValidationMode};
pub use repo::intern_repo::{InternRepository, JsonInternRepository, RepoError, RepoResult};
pub use search::filter::{AppliedFilters, InternListQuery, Pagination, SortField, SortOrder};
pub use service::dashboard::{compute_stats, DashboardInputs, DashboardStats};
pub use service::derive::{decorate, InternView};
pub use service::intern_service::{
    Clock, DeleteOutcome, InternList, InternService, ServiceError, ServiceResult, UpdateOutcome,
};
pub use store::{StoreDocument, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

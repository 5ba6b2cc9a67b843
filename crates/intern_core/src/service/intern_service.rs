//! Intern use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/delete entry points for HTTP callers.
//! - Compose validation, email uniqueness, persistence and derived fields.
//! - Expose dashboard aggregation over the current record set.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once in `create_intern` and never
//!   overwritten by patches.
//! - Deleting requires an explicit confirmation and a non-`Active` status.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::draft::InternDraft;
use crate::model::intern::{InternId, InternRecord, InternStatus};
use crate::model::validation::{
    check_date_window, parse_draft, FieldViolation, ParsedDraft, ValidationMode,
};
use crate::repo::intern_repo::{InternRepository, RepoError};
use crate::search::filter::{AppliedFilters, InternListQuery, Pagination};
use crate::service::dashboard::{compute_stats, DashboardInputs, DashboardStats};
use crate::service::derive::{decorate, InternView};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Time source used for timestamps and derived fields.
pub type Clock = fn() -> DateTime<Utc>;

/// Service error for intern use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// One or more field rules failed.
    Validation(Vec<FieldViolation>),
    /// Malformed id or missing confirmation.
    InvalidInput(String),
    /// Unique constraint (email) would be violated.
    Conflict(String),
    /// Target intern does not exist.
    NotFound(InternId),
    /// Operation is not allowed in the record's current state.
    Precondition(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(violations) => {
                write!(f, "validation failed ({} violation(s))", violations.len())
            }
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "intern not found: {id}"),
            Self::Precondition(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::DuplicateEmail(_) => Self::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()),
            other => Self::Repo(other),
        }
    }
}

pub const DUPLICATE_EMAIL_MESSAGE: &str = "An intern with this email already exists";
pub const DELETE_ACTIVE_MESSAGE: &str = "Cannot delete active intern";
pub const DELETE_CONFIRM_MESSAGE: &str = "Deletion requires confirmation (confirm=true)";

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq)]
pub struct InternList {
    pub items: Vec<InternView>,
    pub filters: AppliedFilters,
    /// Present only when the query asked for paging.
    pub pagination: Option<Pagination>,
}

/// Update result: the new view plus wire names of fields whose value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub intern: InternView,
    pub updated_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub id: InternId,
    pub deleted_at: DateTime<Utc>,
}

/// Intern service facade over repository implementations.
pub struct InternService<R: InternRepository> {
    repo: R,
    clock: Clock,
}

impl<R: InternRepository> InternService<R> {
    /// Creates a service using the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Utc::now)
    }

    /// Creates a service with an explicit time source.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Creates one intern from a candidate draft.
    ///
    /// # Contract
    /// - Validation runs first and reports every violation.
    /// - Duplicate emails (case-insensitive) fail with `Conflict`.
    /// - `status` defaults to `Pending`.
    pub fn create_intern(&mut self, draft: &InternDraft) -> ServiceResult<InternView> {
        let started_at = Instant::now();
        let parsed = parse_draft(draft, ValidationMode::Create).map_err(|violations| {
            warn!(
                "event=intern_create module=service status=rejected reason=validation violations={}",
                violations.len()
            );
            ServiceError::Validation(violations)
        })?;

        let ParsedDraft {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            department: Some(department),
            ..
        } = parsed.clone()
        else {
            return Err(ServiceError::InvalidInput(
                "required fields missing after validation".to_string(),
            ));
        };

        if self.repo.find_by_email(&email)?.is_some() {
            warn!("event=intern_create module=service status=rejected reason=duplicate_email");
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }

        let now = self.now();
        let record = InternRecord {
            id: self.repo.allocate_id(),
            first_name,
            last_name,
            email,
            phone: parsed.phone,
            department,
            status: parsed.status.unwrap_or(InternStatus::Pending),
            start_date: parsed.start_date,
            end_date: parsed.end_date,
            university: parsed.university,
            gpa: parsed.gpa,
            skills: parsed.skills,
            projects: parsed.projects,
            notes: parsed.notes,
            created_at: now,
            status_changed_at: Some(now),
        };
        self.repo.insert_intern(&record)?;

        info!(
            "event=intern_create module=service status=ok id={} duration_ms={}",
            record.id,
            started_at.elapsed().as_millis()
        );
        Ok(decorate(record, now))
    }

    /// Gets one intern by id text.
    ///
    /// Malformed ids fail with `InvalidInput` before any lookup.
    pub fn get_intern(&self, id: &str) -> ServiceResult<InternView> {
        let id = parse_id(id)?;
        let record = self.load(&id)?;
        Ok(decorate(record, self.now()))
    }

    /// Lists interns using filter, sort and optional paging options.
    pub fn list_interns(&self, query: &InternListQuery) -> ServiceResult<InternList> {
        let now = self.now();
        let matched = query.apply(self.repo.list_interns()?);
        let (page, pagination) = query.paginate(matched);
        Ok(InternList {
            items: page
                .into_iter()
                .map(|record| decorate(record, now))
                .collect(),
            filters: query.applied_filters(),
            pagination,
        })
    }

    /// Applies a partial patch to one intern.
    ///
    /// # Contract
    /// - Only non-empty supplied fields are validated and applied.
    /// - The merged start/end window must stay ordered.
    /// - Changing `status` refreshes `status_changed_at`.
    pub fn update_intern(&mut self, id: &str, patch: &InternDraft) -> ServiceResult<UpdateOutcome> {
        let started_at = Instant::now();
        let id = parse_id(id)?;
        let current = self.load(&id)?;
        let parsed = parse_draft(patch, ValidationMode::Update).map_err(ServiceError::Validation)?;

        if let Some(violation) = check_date_window(
            parsed.start_date.or(current.start_date),
            parsed.end_date.or(current.end_date),
        ) {
            return Err(ServiceError::Validation(vec![violation]));
        }

        if let Some(email) = parsed.email.as_deref() {
            if !current.has_email(email) {
                let taken = self
                    .repo
                    .find_by_email(email)?
                    .is_some_and(|other| other.id != current.id);
                if taken {
                    warn!(
                        "event=intern_update module=service status=rejected reason=duplicate_email id={id}"
                    );
                    return Err(ServiceError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()));
                }
            }
        }

        let now = self.now();
        let mut next = current.clone();
        let updated_fields = apply_patch(&mut next, parsed);
        if updated_fields.contains(&"status") {
            next.status_changed_at = Some(now);
        }
        if !updated_fields.is_empty() {
            self.repo.update_intern(&next)?;
        }

        info!(
            "event=intern_update module=service status=ok id={} changed={} duration_ms={}",
            next.id,
            updated_fields.len(),
            started_at.elapsed().as_millis()
        );
        Ok(UpdateOutcome {
            intern: decorate(next, now),
            updated_fields,
        })
    }

    /// Deletes one intern after guard checks.
    ///
    /// Checks run in order: id format, existence, active-status guard,
    /// confirmation flag.
    pub fn delete_intern(&mut self, id: &str, confirm: bool) -> ServiceResult<DeleteOutcome> {
        let id = parse_id(id)?;
        let current = self.load(&id)?;

        if current.is_delete_protected() {
            warn!("event=intern_delete module=service status=rejected reason=active id={id}");
            return Err(ServiceError::Precondition(DELETE_ACTIVE_MESSAGE.to_string()));
        }
        if !confirm {
            return Err(ServiceError::InvalidInput(DELETE_CONFIRM_MESSAGE.to_string()));
        }

        self.repo.delete_intern(&id)?;
        info!("event=intern_delete module=service status=ok id={id}");
        Ok(DeleteOutcome {
            id,
            deleted_at: self.now(),
        })
    }

    /// Aggregates dashboard stats over all records.
    pub fn dashboard_stats(&self, inputs: &DashboardInputs) -> ServiceResult<DashboardStats> {
        let records = self.repo.list_interns()?;
        Ok(compute_stats(&records, self.now(), inputs))
    }

    fn load(&self, id: &InternId) -> ServiceResult<InternRecord> {
        self.repo
            .get_intern(id)?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }
}

fn parse_id(value: &str) -> ServiceResult<InternId> {
    InternId::parse(value.trim())
        .map_err(|_| ServiceError::InvalidInput("Invalid intern ID format".to_string()))
}

/// Writes supplied fields into `record`, returning names of changed fields.
fn apply_patch(record: &mut InternRecord, patch: ParsedDraft) -> Vec<&'static str> {
    let mut changed = Vec::new();

    set_field(&mut changed, "firstName", &mut record.first_name, patch.first_name);
    set_field(&mut changed, "lastName", &mut record.last_name, patch.last_name);
    set_field(&mut changed, "email", &mut record.email, patch.email);
    set_optional(&mut changed, "phone", &mut record.phone, patch.phone);
    set_field(&mut changed, "department", &mut record.department, patch.department);
    set_field(&mut changed, "status", &mut record.status, patch.status);
    set_optional(&mut changed, "startDate", &mut record.start_date, patch.start_date);
    set_optional(&mut changed, "endDate", &mut record.end_date, patch.end_date);
    set_optional(&mut changed, "university", &mut record.university, patch.university);
    set_optional(&mut changed, "gpa", &mut record.gpa, patch.gpa);
    set_optional(&mut changed, "skills", &mut record.skills, patch.skills);
    set_optional(&mut changed, "projects", &mut record.projects, patch.projects);
    set_optional(&mut changed, "notes", &mut record.notes, patch.notes);

    changed
}

fn set_field<T: PartialEq>(
    changed: &mut Vec<&'static str>,
    name: &'static str,
    slot: &mut T,
    value: Option<T>,
) {
    if let Some(value) = value {
        if *slot != value {
            *slot = value;
            changed.push(name);
        }
    }
}

fn set_optional<T: PartialEq>(
    changed: &mut Vec<&'static str>,
    name: &'static str,
    slot: &mut Option<T>,
    value: Option<T>,
) {
    if let Some(value) = value {
        if slot.as_ref() != Some(&value) {
            *slot = Some(value);
            changed.push(name);
        }
    }
}

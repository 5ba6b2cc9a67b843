//! Field-level validation for intern drafts.
//!
//! # Responsibility
//! - Check a candidate/patch against format, range and enumeration rules.
//! - Convert raw draft text into typed values once rules pass.
//!
//! # Invariants
//! - Pure: no side effects, no store access. Email uniqueness belongs to the
//!   service layer.
//! - All violated rules are reported; validation never stops at the first.
//! - Required-field rules apply only in `ValidationMode::Create`.

use crate::model::draft::InternDraft;
use crate::model::intern::{Department, InternStatus};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const MIN_NAME_CHARS: usize = 2;
const GPA_MIN: f64 = 0.0;
const GPA_MAX: f64 = 4.0;
const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Which rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Required fields must be present.
    Create,
    /// Only supplied fields are checked.
    Update,
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// camelCase wire name of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Typed, normalized form of an `InternDraft` that passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub status: Option<InternStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub university: Option<String>,
    pub gpa: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Validates a draft and returns every violated rule.
///
/// Returns an empty list when the draft is valid for `mode`.
pub fn validate(draft: &InternDraft, mode: ValidationMode) -> Vec<FieldViolation> {
    match parse_draft(draft, mode) {
        Ok(_) => Vec::new(),
        Err(violations) => violations,
    }
}

/// Validates and converts a draft into typed values.
///
/// # Errors
/// - Returns the full violation list when any rule fails.
pub fn parse_draft(
    draft: &InternDraft,
    mode: ValidationMode,
) -> Result<ParsedDraft, Vec<FieldViolation>> {
    let draft = draft.normalized();
    let mut violations = Vec::new();

    if mode == ValidationMode::Create {
        for (field, value) in [
            ("firstName", &draft.first_name),
            ("lastName", &draft.last_name),
            ("email", &draft.email),
            ("department", &draft.department),
        ] {
            if value.is_none() {
                violations.push(FieldViolation::new(field, format!("{field} is required")));
            }
        }
    }

    for (field, value) in [
        ("firstName", &draft.first_name),
        ("lastName", &draft.last_name),
    ] {
        if let Some(name) = value {
            if name.chars().count() < MIN_NAME_CHARS {
                violations.push(FieldViolation::new(
                    field,
                    format!("{field} must be at least {MIN_NAME_CHARS} characters"),
                ));
            }
        }
    }

    if let Some(email) = &draft.email {
        if !EMAIL_RE.is_match(email) {
            violations.push(FieldViolation::new(
                "email",
                "email must be a valid email address",
            ));
        }
    }

    let department = match draft.department.as_deref() {
        Some(value) => {
            let parsed = Department::parse(value);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "department",
                    format!(
                        "department must be one of: {}",
                        join_names(Department::ALL.iter().map(|d| d.as_str()))
                    ),
                ));
            }
            parsed
        }
        None => None,
    };

    let status = match draft.status.as_deref() {
        Some(value) => {
            let parsed = InternStatus::parse(value);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "status",
                    format!(
                        "status must be one of: {}",
                        join_names(InternStatus::ALL.iter().map(|s| s.as_str()))
                    ),
                ));
            }
            parsed
        }
        None => None,
    };

    let gpa = match draft.gpa.as_deref() {
        Some(value) => {
            let parsed = value
                .parse::<f64>()
                .ok()
                .filter(|gpa| gpa.is_finite() && (GPA_MIN..=GPA_MAX).contains(gpa));
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "gpa",
                    format!("gpa must be a number between {GPA_MIN:.1} and {GPA_MAX:.1}"),
                ));
            }
            parsed
        }
        None => None,
    };

    let start_date = parse_date_field("startDate", draft.start_date.as_deref(), &mut violations);
    let end_date = parse_date_field("endDate", draft.end_date.as_deref(), &mut violations);
    if let Some(violation) = check_date_window(start_date, end_date) {
        violations.push(violation);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ParsedDraft {
        first_name: draft.first_name,
        last_name: draft.last_name,
        email: draft.email,
        phone: draft.phone,
        department,
        status,
        start_date,
        end_date,
        university: draft.university,
        gpa,
        skills: draft.skills,
        projects: draft.projects,
        notes: draft.notes,
    })
}

/// Checks `end >= start` when both dates are known.
pub fn check_date_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<FieldViolation> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Some(FieldViolation::new(
            "endDate",
            format!("endDate ({end}) must not be before startDate ({start})"),
        )),
        _ => None,
    }
}

fn parse_date_field(
    field: &'static str,
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<NaiveDate> {
    let value = value?;
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(FieldViolation::new(
                field,
                format!("{field} must be a date in YYYY-MM-DD format"),
            ));
            None
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

//! Intern record model.
//!
//! # Responsibility
//! - Define the canonical record persisted by the JSON store.
//! - Provide the `INT-NNN` identifier type and the closed enumerations.
//!
//! # Invariants
//! - `id` is never reassigned; deserialization rejects malformed ids.
//! - `created_at` is set once by the service and never mutated.
//! - `end_date` should not be earlier than `start_date` when both are set.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const INTERN_ID_PREFIX: &str = "INT-";

static INTERN_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^INT-[0-9]{3,9}$").expect("valid intern id regex"));

/// Error returned when text does not match the `INT-NNN` id format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternIdError(pub String);

impl Display for InternIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid intern id `{}`; expected INT-NNN", self.0)
    }
}

impl Error for InternIdError {}

/// Human-readable stable identifier, e.g. `INT-007`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InternId(String);

impl InternId {
    /// Parses and validates an id string.
    ///
    /// Extra zero-padding is dropped, so `INT-0001` parses as `INT-001`.
    pub fn parse(value: &str) -> Result<Self, InternIdError> {
        if !INTERN_ID_RE.is_match(value) {
            return Err(InternIdError(value.to_string()));
        }
        value[INTERN_ID_PREFIX.len()..]
            .parse()
            .map(Self::from_sequence)
            .map_err(|_| InternIdError(value.to_string()))
    }

    /// Formats an id from its numeric sequence, zero-padded to 3 digits.
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format!("{INTERN_ID_PREFIX}{sequence:03}"))
    }

    /// Numeric suffix of this id.
    pub fn sequence(&self) -> u32 {
        self.0[INTERN_ID_PREFIX.len()..].parse().unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for InternId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InternId {
    type Error = InternIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<InternId> for String {
    fn from(value: InternId) -> Self {
        value.0
    }
}

/// Department an intern is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    Design,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    Operations,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Marketing,
        Department::Design,
        Department::DataScience,
        Department::Hr,
        Department::Finance,
        Department::Operations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Marketing => "Marketing",
            Self::Design => "Design",
            Self::DataScience => "Data Science",
            Self::Hr => "HR",
            Self::Finance => "Finance",
            Self::Operations => "Operations",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|department| department.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application/internship lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternStatus {
    /// Application received, not yet started.
    Pending,
    /// Internship in progress. Records in this state cannot be deleted.
    Active,
    /// Internship finished.
    Completed,
}

impl InternStatus {
    pub const ALL: [InternStatus; 3] = [
        InternStatus::Pending,
        InternStatus::Active,
        InternStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Whether this status counts as hired for dashboard metrics.
    pub fn is_hired(self) -> bool {
        matches!(self, Self::Active | Self::Completed)
    }
}

impl Display for InternStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical persisted intern record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternRecord {
    pub id: InternId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across the store, compared case-insensitively.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub department: Department,
    pub status: InternStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Should be >= `start_date` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Last time `status` was set. Absent for records imported without history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_changed_at: Option<DateTime<Utc>>,
}

impl InternRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive email comparison used by uniqueness checks.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Whether deletion is currently blocked by status.
    pub fn is_delete_protected(&self) -> bool {
        self.status == InternStatus::Active
    }
}

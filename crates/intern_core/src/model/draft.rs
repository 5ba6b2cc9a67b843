//! Raw candidate/patch input for create and update use-cases.
//!
//! # Responsibility
//! - Accept loosely-typed client input (form posts send numbers as text,
//!   lists as comma-separated strings).
//! - Normalize input so empty values mean "not supplied".
//!
//! # Invariants
//! - Drafts never carry `id` or `createdAt`; unknown fields are ignored.
//! - Typed parsing happens in `model::validation`, not here.

use serde::{Deserialize, Deserializer};

/// Candidate record (create) or partial patch (update).
///
/// Every field is optional so the same shape serves both modes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternDraft {
    #[serde(default, deserialize_with = "de_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "de_text")]
    pub university: Option<String>,
    /// Kept as text; numeric range is checked by the validator.
    #[serde(default, deserialize_with = "de_text")]
    pub gpa: Option<String>,
    #[serde(default, deserialize_with = "de_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_list")]
    pub projects: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_text")]
    pub notes: Option<String>,
}

impl InternDraft {
    /// Returns a copy with trimmed text and empty values dropped to `None`.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: normalize_text(&self.first_name),
            last_name: normalize_text(&self.last_name),
            email: normalize_text(&self.email),
            phone: normalize_text(&self.phone),
            department: normalize_text(&self.department),
            status: normalize_text(&self.status),
            start_date: normalize_text(&self.start_date),
            end_date: normalize_text(&self.end_date),
            university: normalize_text(&self.university),
            gpa: normalize_text(&self.gpa),
            skills: normalize_list(&self.skills),
            projects: normalize_list(&self.projects),
            notes: normalize_text(&self.notes),
        }
    }
}

fn normalize_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn normalize_list(value: &Option<Vec<String>>) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .as_ref()?
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextInput {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListInput {
    Items(Vec<String>),
    Joined(String),
}

fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextInput>::deserialize(deserializer)?.map(|value| match value {
            TextInput::Text(text) => text,
            TextInput::Number(number) => number.to_string(),
            TextInput::Flag(flag) => flag.to_string(),
        }),
    )
}

fn de_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<ListInput>::deserialize(deserializer)?.map(|value| match value {
            ListInput::Items(items) => items,
            ListInput::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        }),
    )
}

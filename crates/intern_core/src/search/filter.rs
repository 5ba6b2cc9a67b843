//! In-memory list query over intern records.
//!
//! # Invariants
//! - Filters form a conjunction; an absent filter matches everything.
//! - Text matching is case-insensitive.
//! - Sorting is stable: ties keep insertion order, missing values sort last.

use crate::model::intern::InternRecord;
use serde::Serialize;
use std::cmp::Ordering;

pub const LIST_DEFAULT_LIMIT: u32 = 10;
pub const LIST_LIMIT_MAX: u32 = 100;

/// Sortable record fields, named by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    LastName,
    Email,
    Department,
    Status,
    StartDate,
    EndDate,
    Gpa,
    CreatedAt,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Department => "department",
            Self::Status => "status",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Gpa => "gpa",
            Self::CreatedAt => "createdAt",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "department" => Some(Self::Department),
            "status" => Some(Self::Status),
            "startDate" => Some(Self::StartDate),
            "endDate" => Some(Self::EndDate),
            "gpa" => Some(Self::Gpa),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Query options for listing interns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternListQuery {
    /// Substring matched against first name, last name and email.
    pub search: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    /// `None` keeps insertion order.
    pub sort_by: Option<SortField>,
    pub order: SortOrder,
    /// 1-based page; paging is applied when `page` or `limit` is set.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Filter echo returned alongside list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub sort_by: Option<&'static str>,
    pub order: SortOrder,
}

/// Page metadata for paged list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: u32,
}

impl InternListQuery {
    /// Normalized filter echo (blank filters dropped).
    pub fn applied_filters(&self) -> AppliedFilters {
        AppliedFilters {
            search: non_blank(&self.search),
            status: non_blank(&self.status),
            department: non_blank(&self.department),
            sort_by: self.sort_by.map(SortField::as_str),
            order: self.order,
        }
    }

    pub fn wants_paging(&self) -> bool {
        self.page.is_some() || self.limit.is_some()
    }

    /// Returns whether `record` satisfies every supplied filter.
    pub fn matches(&self, record: &InternRecord) -> bool {
        if let Some(search) = non_blank(&self.search) {
            let needle = search.to_lowercase();
            let hit = [
                record.first_name.as_str(),
                record.last_name.as_str(),
                record.email.as_str(),
            ]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(status) = non_blank(&self.status) {
            if !record.status.as_str().eq_ignore_ascii_case(&status) {
                return false;
            }
        }

        if let Some(department) = non_blank(&self.department) {
            if !record.department.as_str().eq_ignore_ascii_case(&department) {
                return false;
            }
        }

        true
    }

    /// Filters and sorts records, returning matches in result order.
    pub fn apply(&self, records: Vec<InternRecord>) -> Vec<InternRecord> {
        let mut matched: Vec<InternRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();
        if let Some(field) = self.sort_by {
            matched.sort_by(|a, b| compare_by(field, self.order, a, b));
        }
        matched
    }

    /// Slices an already-filtered result set into the requested page.
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, Option<Pagination>) {
        if !self.wants_paging() {
            return (items, None);
        }

        let limit = normalize_list_limit(self.limit);
        let page = self.page.unwrap_or(1).max(1);
        let total = items.len();
        let total_pages = total.div_ceil(limit as usize) as u32;
        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let items = items.into_iter().skip(skip).take(limit as usize).collect();

        (
            items,
            Some(Pagination {
                page,
                limit,
                total,
                total_pages,
            }),
        )
    }
}

/// Applies default/max bounds to a requested page size.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(LIST_DEFAULT_LIMIT)
        .clamp(1, LIST_LIMIT_MAX)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

fn compare_by(field: SortField, order: SortOrder, a: &InternRecord, b: &InternRecord) -> Ordering {
    match field {
        SortField::FirstName => directed(order, cmp_text(&a.first_name, &b.first_name)),
        SortField::LastName => directed(order, cmp_text(&a.last_name, &b.last_name)),
        SortField::Email => directed(order, cmp_text(&a.email, &b.email)),
        SortField::Department => directed(order, a.department.as_str().cmp(b.department.as_str())),
        SortField::Status => directed(order, a.status.as_str().cmp(b.status.as_str())),
        SortField::StartDate => cmp_optional(order, a.start_date, b.start_date, |x, y| x.cmp(y)),
        SortField::EndDate => cmp_optional(order, a.end_date, b.end_date, |x, y| x.cmp(y)),
        SortField::Gpa => cmp_optional(order, a.gpa, b.gpa, |x, y| x.total_cmp(y)),
        SortField::CreatedAt => directed(order, a.created_at.cmp(&b.created_at)),
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn directed(order: SortOrder, ordering: Ordering) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn cmp_optional<T>(
    order: SortOrder,
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(order, cmp(&a, &b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//! Response-time derived fields for intern records.
//!
//! # Invariants
//! - Derived fields are recomputed on every read and never persisted.
//! - Dates count from 00:00 UTC of the stored calendar day.

use crate::model::intern::InternRecord;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Intern record plus derived, read-only projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternView {
    #[serde(flatten)]
    pub record: InternRecord,
    pub full_name: String,
    /// 0..=100, share of the start..end window elapsed at `now`.
    pub progress_percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_since_start: Option<i64>,
}

/// Decorates a stored record with derived fields as of `now`.
pub fn decorate(record: InternRecord, now: DateTime<Utc>) -> InternView {
    let full_name = record.full_name();
    let days_since_start = record
        .start_date
        .map(|start| days_since(start, now));
    let progress_percentage = match (record.start_date, record.end_date) {
        (Some(start), Some(end)) => progress_percentage(start, end, now),
        _ => 0,
    };

    InternView {
        record,
        full_name,
        progress_percentage,
        days_since_start,
    }
}

/// Whole days elapsed since `start`, floored at zero.
pub fn days_since(start: NaiveDate, now: DateTime<Utc>) -> i64 {
    (now - start_of_day(start)).num_days().max(0)
}

/// Elapsed share of `start..end` at `now`, rounded and clamped to 0..=100.
///
/// A zero-length window reports 100 once `now` reaches it.
pub fn progress_percentage(start: NaiveDate, end: NaiveDate, now: DateTime<Utc>) -> u8 {
    let window_start = start_of_day(start);
    let total_ms = (start_of_day(end) - window_start).num_milliseconds();
    let elapsed_ms = (now - window_start).num_milliseconds();

    if total_ms <= 0 {
        return if elapsed_ms >= 0 { 100 } else { 0 };
    }

    let ratio = 100.0 * elapsed_ms as f64 / total_ms as f64;
    ratio.round().clamp(0.0, 100.0) as u8
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

//! Dashboard aggregation over all intern records.
//!
//! # Responsibility
//! - Count records by status and compute GPA/department insights.
//! - Derive week/month trends from record timestamps.
//!
//! # Invariants
//! - Aggregation is a pure function of `(records, now, inputs)`.
//! - `hired_this_month` counts only records with a `status_changed_at`
//!   inside the current UTC calendar month.
//! - `interviews_scheduled` is passed through from `DashboardInputs`.

use crate::model::intern::{Department, InternRecord, InternStatus};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

const TREND_WEEK_DAYS: i64 = 7;

/// Values the record store cannot provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardInputs {
    pub interviews_scheduled: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub metrics: DashboardMetrics,
    pub trends: DashboardTrends,
    pub insights: DashboardInsights,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_interns: usize,
    /// Records still in `Pending`.
    pub active_applications: usize,
    pub active_interns: usize,
    pub completed_interns: usize,
    pub interviews_scheduled: u32,
    pub hired_this_month: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTrends {
    pub growth: TrendGrowth,
    pub period: TrendPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendGrowth {
    /// Created in the last 7 days minus created in the 7 days before.
    pub applications_change: i64,
    /// Hired this month minus hired last month.
    pub hired_change: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPeriod {
    pub week_start: DateTime<Utc>,
    pub month_start: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInsights {
    /// Mean over records that have a GPA; 0 when none do.
    #[serde(rename = "averageGPA")]
    pub average_gpa: f64,
    pub gpa_sample_size: usize,
    pub department_breakdown: Vec<DepartmentCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: Department,
    pub count: usize,
}

/// Computes dashboard metrics, trends and insights as of `now`.
pub fn compute_stats(
    records: &[InternRecord],
    now: DateTime<Utc>,
    inputs: &DashboardInputs,
) -> DashboardStats {
    let count_status = |status: InternStatus| {
        records
            .iter()
            .filter(|record| record.status == status)
            .count()
    };

    let month_start = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
    let next_month_start = month_start
        .checked_add_months(Months::new(1))
        .unwrap_or(month_start);
    let previous_month_start = month_start
        .checked_sub_months(Months::new(1))
        .unwrap_or(month_start);

    let hired_this_month = count_hired_between(records, month_start, next_month_start);
    let hired_last_month = count_hired_between(records, previous_month_start, month_start);

    let week_start = now - Duration::days(TREND_WEEK_DAYS);
    let previous_week_start = week_start - Duration::days(TREND_WEEK_DAYS);
    let created_this_week = count_created_between(records, week_start, now);
    let created_previous_week = count_created_between(records, previous_week_start, week_start);

    let gpas: Vec<f64> = records.iter().filter_map(|record| record.gpa).collect();
    let average_gpa = if gpas.is_empty() {
        0.0
    } else {
        gpas.iter().sum::<f64>() / gpas.len() as f64
    };

    let department_breakdown = Department::ALL
        .into_iter()
        .map(|department| DepartmentCount {
            department,
            count: records
                .iter()
                .filter(|record| record.department == department)
                .count(),
        })
        .collect();

    DashboardStats {
        metrics: DashboardMetrics {
            total_interns: records.len(),
            active_applications: count_status(InternStatus::Pending),
            active_interns: count_status(InternStatus::Active),
            completed_interns: count_status(InternStatus::Completed),
            interviews_scheduled: inputs.interviews_scheduled,
            hired_this_month,
        },
        trends: DashboardTrends {
            growth: TrendGrowth {
                applications_change: created_this_week as i64 - created_previous_week as i64,
                hired_change: hired_this_month as i64 - hired_last_month as i64,
            },
            period: TrendPeriod {
                week_start,
                month_start,
            },
        },
        insights: DashboardInsights {
            average_gpa,
            gpa_sample_size: gpas.len(),
            department_breakdown,
        },
    }
}

fn count_hired_between(records: &[InternRecord], from: NaiveDate, until: NaiveDate) -> usize {
    let from = from.and_time(NaiveTime::MIN).and_utc();
    let until = until.and_time(NaiveTime::MIN).and_utc();
    records
        .iter()
        .filter(|record| record.status.is_hired())
        .filter(|record| {
            record
                .status_changed_at
                .is_some_and(|changed_at| changed_at >= from && changed_at < until)
        })
        .count()
}

/// Counts records created in `(from, until]`.
fn count_created_between(
    records: &[InternRecord],
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> usize {
    records
        .iter()
        .filter(|record| record.created_at > from && record.created_at <= until)
        .count()
}

use chrono::{DateTime, TimeZone, Utc};
use intern_core::{
    compute_stats, DashboardInputs, Department, InternId, InternRecord, InternService,
    InternStatus, JsonInternRepository, StoreDocument,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

fn record(
    sequence: u32,
    status: InternStatus,
    department: Department,
    gpa: Option<f64>,
    created_at: DateTime<Utc>,
    status_changed_at: Option<DateTime<Utc>>,
) -> InternRecord {
    InternRecord {
        id: InternId::from_sequence(sequence),
        first_name: format!("First{sequence}"),
        last_name: "Tester".to_string(),
        email: format!("intern{sequence}@example.com"),
        phone: None,
        department,
        status,
        start_date: None,
        end_date: None,
        university: None,
        gpa,
        skills: None,
        projects: None,
        notes: None,
        created_at,
        status_changed_at,
    }
}

#[test]
fn empty_store_reports_zero_metrics() {
    let stats = compute_stats(&[], at(2024, 7, 15), &DashboardInputs::default());

    assert_eq!(stats.metrics.total_interns, 0);
    assert_eq!(stats.metrics.active_applications, 0);
    assert_eq!(stats.metrics.hired_this_month, 0);
    assert_eq!(stats.insights.average_gpa, 0.0);
    assert_eq!(stats.insights.gpa_sample_size, 0);
    assert!(stats
        .insights
        .department_breakdown
        .iter()
        .all(|entry| entry.count == 0));
}

#[test]
fn counts_statuses_and_averages_known_gpas() {
    let now = at(2024, 7, 15);
    let records = vec![
        record(1, InternStatus::Active, Department::Engineering, Some(3.9), at(2024, 5, 1), None),
        record(2, InternStatus::Active, Department::DataScience, Some(3.85), at(2024, 5, 2), None),
        record(3, InternStatus::Pending, Department::Marketing, None, at(2024, 5, 3), None),
    ];

    let stats = compute_stats(&records, now, &DashboardInputs { interviews_scheduled: 4 });

    assert_eq!(stats.metrics.total_interns, 3);
    assert_eq!(stats.metrics.active_applications, 1);
    assert_eq!(stats.metrics.active_interns, 2);
    assert_eq!(stats.metrics.completed_interns, 0);
    assert_eq!(stats.metrics.interviews_scheduled, 4);
    assert!((stats.insights.average_gpa - 3.875).abs() < 1e-9);
    assert_eq!(stats.insights.gpa_sample_size, 2);

    let engineering = stats
        .insights
        .department_breakdown
        .iter()
        .find(|entry| entry.department == Department::Engineering)
        .unwrap();
    assert_eq!(engineering.count, 1);
    assert_eq!(stats.insights.department_breakdown.len(), Department::ALL.len());
}

#[test]
fn hired_this_month_uses_status_change_time() {
    let now = at(2024, 7, 15);
    let records = vec![
        record(1, InternStatus::Active, Department::Design, None, at(2024, 1, 1), Some(at(2024, 7, 2))),
        record(2, InternStatus::Completed, Department::Design, None, at(2024, 1, 1), Some(at(2024, 7, 10))),
        record(3, InternStatus::Active, Department::Design, None, at(2024, 1, 1), Some(at(2024, 6, 20))),
        record(4, InternStatus::Pending, Department::Design, None, at(2024, 1, 1), Some(at(2024, 7, 5))),
        record(5, InternStatus::Active, Department::Design, None, at(2024, 1, 1), None),
    ];

    let stats = compute_stats(&records, now, &DashboardInputs::default());

    assert_eq!(stats.metrics.hired_this_month, 2);
    assert_eq!(stats.trends.growth.hired_change, 1);
    assert_eq!(stats.trends.period.month_start.to_string(), "2024-07-01");
}

#[test]
fn applications_change_compares_rolling_weeks() {
    let now = at(2024, 7, 15);
    let records = vec![
        record(1, InternStatus::Pending, Department::Finance, None, at(2024, 7, 14), None),
        record(2, InternStatus::Pending, Department::Finance, None, at(2024, 7, 12), None),
        record(3, InternStatus::Pending, Department::Finance, None, at(2024, 7, 11), None),
        record(4, InternStatus::Pending, Department::Finance, None, at(2024, 7, 5), None),
        record(5, InternStatus::Pending, Department::Finance, None, at(2024, 6, 1), None),
    ];

    let stats = compute_stats(&records, now, &DashboardInputs::default());

    assert_eq!(stats.trends.growth.applications_change, 2);
    assert_eq!(stats.trends.period.week_start, at(2024, 7, 8));
}

#[test]
fn service_stats_reflect_store_contents() {
    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
    }
    let document = StoreDocument::from_records(vec![
        record(1, InternStatus::Active, Department::Hr, Some(3.0), at(2024, 7, 1), None),
        record(2, InternStatus::Completed, Department::Hr, Some(4.0), at(2024, 7, 1), None),
    ]);
    let repo = JsonInternRepository::in_memory(document).unwrap();
    let service = InternService::with_clock(repo, clock);

    let stats = service.dashboard_stats(&DashboardInputs::default()).unwrap();
    assert_eq!(stats.metrics.total_interns, 2);
    assert_eq!(stats.metrics.completed_interns, 1);
    assert!((stats.insights.average_gpa - 3.5).abs() < 1e-9);
}

#[test]
fn stats_serialize_with_wire_names() {
    let stats = compute_stats(&[], at(2024, 7, 15), &DashboardInputs::default());
    let value = serde_json::to_value(&stats).unwrap();

    assert!(value["metrics"]["totalInterns"].is_number());
    assert!(value["metrics"]["activeApplications"].is_number());
    assert!(value["metrics"]["interviewsScheduled"].is_number());
    assert!(value["metrics"]["hiredThisMonth"].is_number());
    assert!(value["insights"]["averageGPA"].is_number());
    assert!(value["trends"]["growth"]["hiredChange"].is_number());
}

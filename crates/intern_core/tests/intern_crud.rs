use chrono::{DateTime, TimeZone, Utc};
use intern_core::{
    InternDraft, InternListQuery, InternService, InternStatus, JsonInternRepository,
    ServiceError, SortField, SortOrder, StoreDocument,
};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
}

fn empty_service() -> InternService<JsonInternRepository> {
    let repo = JsonInternRepository::in_memory(StoreDocument::default()).unwrap();
    InternService::with_clock(repo, fixed_now)
}

fn draft(first: &str, last: &str, email: &str, department: &str) -> InternDraft {
    InternDraft {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        email: Some(email.to_string()),
        department: Some(department.to_string()),
        ..InternDraft::default()
    }
}

#[test]
fn create_assigns_sequential_id_and_defaults_status() {
    let mut service = empty_service();

    let first = service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();
    let second = service
        .create_intern(&draft("Alan", "Turing", "alan@example.com", "data science"))
        .unwrap();

    assert_eq!(first.record.id.as_str(), "INT-001");
    assert_eq!(second.record.id.as_str(), "INT-002");
    assert_eq!(first.record.status, InternStatus::Pending);
    assert_eq!(first.record.created_at, fixed_now());
    assert_eq!(second.record.department.as_str(), "Data Science");
    assert_eq!(first.full_name, "Ada Lovelace");
}

#[test]
fn create_rejects_duplicate_email_case_insensitively() {
    let mut service = empty_service();
    service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();

    let err = service
        .create_intern(&draft("Ada", "Byron", "ADA@example.com", "Design"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test]
fn create_reports_all_violations() {
    let mut service = empty_service();
    let invalid = InternDraft {
        first_name: Some("A".to_string()),
        last_name: Some(String::new()),
        email: Some("invalid-email".to_string()),
        department: Some("InvalidDept".to_string()),
        gpa: Some("5.0".to_string()),
        ..InternDraft::default()
    };

    match service.create_intern(&invalid).unwrap_err() {
        ServiceError::Validation(violations) => {
            let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
            for expected in ["firstName", "lastName", "email", "department", "gpa"] {
                assert!(fields.contains(&expected), "missing {expected}: {fields:?}");
            }
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn gpa_upper_bound_is_inclusive() {
    let mut service = empty_service();

    let mut too_high = draft("Ada", "Lovelace", "ada@example.com", "Engineering");
    too_high.gpa = Some("4.5".to_string());
    let err = service.create_intern(&too_high).unwrap_err();
    assert!(
        matches!(&err, ServiceError::Validation(v) if v.len() == 1 && v[0].field == "gpa"),
        "unexpected error: {err:?}"
    );

    let mut at_max = too_high.clone();
    at_max.gpa = Some("4.0".to_string());
    let created = service.create_intern(&at_max).unwrap();
    assert_eq!(created.record.gpa, Some(4.0));
}

#[test]
fn malformed_id_is_distinct_from_missing_id() {
    let service = empty_service();

    assert!(matches!(
        service.get_intern("BOGUS").unwrap_err(),
        ServiceError::InvalidInput(_)
    ));
    assert!(matches!(
        service.get_intern("INT-999").unwrap_err(),
        ServiceError::NotFound(id) if id.as_str() == "INT-999"
    ));
}

#[test]
fn delete_is_blocked_while_active_and_allowed_after_completion() {
    let mut service = empty_service();
    let mut candidate = draft("Ada", "Lovelace", "ada@example.com", "Engineering");
    candidate.status = Some("Active".to_string());
    let created = service.create_intern(&candidate).unwrap();
    let id = created.record.id.as_str().to_string();

    let err = service.delete_intern(&id, true).unwrap_err();
    assert!(matches!(err, ServiceError::Precondition(message) if message == "Cannot delete active intern"));

    let patch = InternDraft {
        status: Some("Completed".to_string()),
        ..InternDraft::default()
    };
    service.update_intern(&id, &patch).unwrap();

    let deleted = service.delete_intern(&id, true).unwrap();
    assert_eq!(deleted.id.as_str(), id);
    assert_eq!(deleted.deleted_at, fixed_now());
    assert!(matches!(
        service.get_intern(&id).unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[test]
fn delete_requires_explicit_confirmation() {
    let mut service = empty_service();
    let created = service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();
    let id = created.record.id.as_str().to_string();

    assert!(matches!(
        service.delete_intern(&id, false).unwrap_err(),
        ServiceError::InvalidInput(_)
    ));
    assert!(service.get_intern(&id).is_ok());
    assert!(matches!(
        service.delete_intern("INT-404", true).unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut service = empty_service();
    let first = service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();
    service
        .delete_intern(first.record.id.as_str(), true)
        .unwrap();

    let second = service
        .create_intern(&draft("Alan", "Turing", "alan@example.com", "Engineering"))
        .unwrap();
    assert_eq!(second.record.id.as_str(), "INT-002");
}

#[test]
fn update_treats_empty_strings_as_not_supplied() {
    let mut service = empty_service();
    let mut candidate = draft("Ada", "Lovelace", "ada@example.com", "Engineering");
    candidate.notes = Some("original".to_string());
    let created = service.create_intern(&candidate).unwrap();

    let patch = InternDraft {
        first_name: Some(String::new()),
        notes: Some("   ".to_string()),
        phone: Some("+1 555 0100".to_string()),
        ..InternDraft::default()
    };
    let outcome = service
        .update_intern(created.record.id.as_str(), &patch)
        .unwrap();

    assert_eq!(outcome.updated_fields, vec!["phone"]);
    assert_eq!(outcome.intern.record.first_name, "Ada");
    assert_eq!(outcome.intern.record.notes.as_deref(), Some("original"));
}

#[test]
fn update_rejects_email_taken_by_another_intern() {
    let mut service = empty_service();
    service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();
    let second = service
        .create_intern(&draft("Alan", "Turing", "alan@example.com", "Engineering"))
        .unwrap();

    let patch = InternDraft {
        email: Some("ada@example.com".to_string()),
        ..InternDraft::default()
    };
    let err = service
        .update_intern(second.record.id.as_str(), &patch)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let own_email = InternDraft {
        email: Some("ALAN@example.com".to_string()),
        ..InternDraft::default()
    };
    let outcome = service
        .update_intern(second.record.id.as_str(), &own_email)
        .unwrap();
    assert_eq!(outcome.updated_fields, vec!["email"]);
}

#[test]
fn update_checks_merged_date_window() {
    let mut service = empty_service();
    let mut candidate = draft("Ada", "Lovelace", "ada@example.com", "Engineering");
    candidate.start_date = Some("2024-06-01".to_string());
    let created = service.create_intern(&candidate).unwrap();

    let patch = InternDraft {
        end_date: Some("2024-05-01".to_string()),
        ..InternDraft::default()
    };
    let err = service
        .update_intern(created.record.id.as_str(), &patch)
        .unwrap_err();
    assert!(matches!(&err, ServiceError::Validation(v) if v[0].field == "endDate"));
}

#[test]
fn create_get_update_get_roundtrip_changes_only_patched_fields() {
    let mut service = empty_service();
    let mut candidate = draft("Ada", "Lovelace", "ada@example.com", "Engineering");
    candidate.university = Some("Cambridge".to_string());
    candidate.skills = Some(vec!["Analysis".to_string()]);
    candidate.start_date = Some("2024-07-01".to_string());
    candidate.end_date = Some("2024-07-31".to_string());

    let created = service.create_intern(&candidate).unwrap();
    let id = created.record.id.as_str().to_string();
    let fetched = service.get_intern(&id).unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.days_since_start, Some(14));
    assert_eq!(fetched.progress_percentage, 48);

    let patch = InternDraft {
        gpa: Some("3.7".to_string()),
        notes: Some("Updated via test".to_string()),
        ..InternDraft::default()
    };
    let outcome = service.update_intern(&id, &patch).unwrap();
    assert_eq!(outcome.updated_fields, vec!["gpa", "notes"]);

    let after = service.get_intern(&id).unwrap();
    let mut expected = created.record.clone();
    expected.gpa = Some(3.7);
    expected.notes = Some("Updated via test".to_string());
    assert_eq!(after.record, expected);
    assert_eq!(after.record.id, created.record.id);
    assert_eq!(after.record.created_at, created.record.created_at);
}

#[test]
fn status_change_refreshes_status_timestamp_only_when_changed() {
    let mut service = empty_service();
    let created = service
        .create_intern(&draft("Ada", "Lovelace", "ada@example.com", "Engineering"))
        .unwrap();
    let id = created.record.id.as_str().to_string();

    let same = InternDraft {
        status: Some("pending".to_string()),
        ..InternDraft::default()
    };
    let outcome = service.update_intern(&id, &same).unwrap();
    assert!(outcome.updated_fields.is_empty());

    let active = InternDraft {
        status: Some("Active".to_string()),
        ..InternDraft::default()
    };
    let outcome = service.update_intern(&id, &active).unwrap();
    assert_eq!(outcome.updated_fields, vec!["status"]);
    assert_eq!(outcome.intern.record.status_changed_at, Some(fixed_now()));
}

#[test]
fn list_search_is_case_insensitive_over_names_and_email() {
    let mut service = empty_service();
    service
        .create_intern(&draft("Johnny", "Appleseed", "ja@example.com", "Engineering"))
        .unwrap();
    service
        .create_intern(&draft("Sarah", "Johnson", "sarah@example.com", "Design"))
        .unwrap();
    service
        .create_intern(&draft("Mia", "Wong", "mia.JOHN@example.com", "HR"))
        .unwrap();
    service
        .create_intern(&draft("Liam", "Smith", "liam@example.com", "HR"))
        .unwrap();

    let query = InternListQuery {
        search: Some("john".to_string()),
        ..InternListQuery::default()
    };
    let listed = service.list_interns(&query).unwrap();
    let names: Vec<_> = listed
        .items
        .iter()
        .map(|view| view.record.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Johnny", "Sarah", "Mia"]);
    assert_eq!(listed.filters.search.as_deref(), Some("john"));
    assert!(listed.pagination.is_none());
}

#[test]
fn list_filters_sort_and_page() {
    let mut service = empty_service();
    for (first, email, department) in [
        ("Zoe", "zoe@example.com", "Engineering"),
        ("Amy", "amy@example.com", "Engineering"),
        ("Max", "max@example.com", "Marketing"),
        ("Bob", "bob@example.com", "Engineering"),
    ] {
        service
            .create_intern(&draft(first, "Tester", email, department))
            .unwrap();
    }

    let query = InternListQuery {
        department: Some("engineering".to_string()),
        status: Some("Pending".to_string()),
        sort_by: Some(SortField::FirstName),
        order: SortOrder::Desc,
        page: Some(1),
        limit: Some(2),
        ..InternListQuery::default()
    };
    let listed = service.list_interns(&query).unwrap();
    let names: Vec<_> = listed
        .items
        .iter()
        .map(|view| view.record.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Zoe", "Bob"]);

    let pagination = listed.pagination.unwrap();
    assert_eq!(pagination.total, 3);
    assert_eq!(pagination.total_pages, 2);
    assert_eq!(listed.filters.sort_by, Some("firstName"));
}

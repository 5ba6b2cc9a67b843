use intern_core::{
    validate, Department, InternDraft, InternId, InternRecord, InternStatus, ValidationMode,
};

fn valid_candidate() -> InternDraft {
    InternDraft {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        department: Some("Engineering".to_string()),
        ..InternDraft::default()
    }
}

fn fields(draft: &InternDraft, mode: ValidationMode) -> Vec<&'static str> {
    validate(draft, mode)
        .into_iter()
        .map(|violation| violation.field)
        .collect()
}

#[test]
fn minimal_candidate_is_valid() {
    assert!(validate(&valid_candidate(), ValidationMode::Create).is_empty());
}

#[test]
fn empty_candidate_reports_every_required_field() {
    let violations = validate(&InternDraft::default(), ValidationMode::Create);
    let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
    assert_eq!(fields, vec!["firstName", "lastName", "email", "department"]);
    assert_eq!(violations[0].message, "firstName is required");
}

#[test]
fn empty_patch_is_valid_in_update_mode() {
    assert!(validate(&InternDraft::default(), ValidationMode::Update).is_empty());
}

#[test]
fn update_mode_still_checks_supplied_fields() {
    let patch = InternDraft {
        email: Some("not-an-email".to_string()),
        status: Some("Hired".to_string()),
        ..InternDraft::default()
    };
    assert_eq!(fields(&patch, ValidationMode::Update), vec!["email", "status"]);
}

#[test]
fn enums_are_matched_case_insensitively() {
    let mut draft = valid_candidate();
    draft.department = Some("data science".to_string());
    draft.status = Some("ACTIVE".to_string());
    assert!(validate(&draft, ValidationMode::Create).is_empty());

    draft.department = Some("Legal".to_string());
    let violations = validate(&draft, ValidationMode::Create);
    assert_eq!(violations.len(), 1);
    assert!(violations[0].message.contains("Data Science"));
}

#[test]
fn gpa_must_be_numeric_and_in_range() {
    for (gpa, ok) in [("0", true), ("4.0", true), ("3.25", true), ("-0.1", false), ("4.01", false), ("abc", false)] {
        let mut draft = valid_candidate();
        draft.gpa = Some(gpa.to_string());
        assert_eq!(
            validate(&draft, ValidationMode::Create).is_empty(),
            ok,
            "gpa {gpa}"
        );
    }
}

#[test]
fn dates_require_iso_format_and_ordering() {
    let mut draft = valid_candidate();
    draft.start_date = Some("06/01/2024".to_string());
    assert_eq!(fields(&draft, ValidationMode::Create), vec!["startDate"]);

    draft.start_date = Some("2024-06-01".to_string());
    draft.end_date = Some("2024-05-31".to_string());
    assert_eq!(fields(&draft, ValidationMode::Create), vec!["endDate"]);

    draft.end_date = Some("2024-06-01".to_string());
    assert!(validate(&draft, ValidationMode::Create).is_empty());
}

#[test]
fn short_names_are_rejected() {
    let mut draft = valid_candidate();
    draft.first_name = Some(" A ".to_string());
    let violations = validate(&draft, ValidationMode::Create);
    assert_eq!(violations[0].field, "firstName");
    assert_eq!(violations[0].message, "firstName must be at least 2 characters");
}

#[test]
fn intern_id_format_is_enforced() {
    assert!(InternId::parse("INT-001").is_ok());
    assert!(InternId::parse("INT-1234").is_ok());
    assert!(InternId::parse("INT-01").is_err());
    assert!(InternId::parse("int-001").is_err());
    assert!(InternId::parse("BOGUS").is_err());
    assert_eq!(InternId::from_sequence(7).as_str(), "INT-007");
    assert_eq!(InternId::from_sequence(1234).as_str(), "INT-1234");
}

#[test]
fn intern_id_drops_extra_zero_padding() {
    assert_eq!(InternId::parse("INT-0001").unwrap().as_str(), "INT-001");
    assert_eq!(InternId::parse("INT-000042").unwrap().as_str(), "INT-042");
    assert_eq!(InternId::parse("INT-01234").unwrap().as_str(), "INT-1234");
    assert_eq!(InternId::parse("INT-0001").unwrap(), InternId::from_sequence(1));
}

#[test]
fn record_json_uses_camel_case_and_display_names() {
    let record: InternRecord = serde_json::from_value(serde_json::json!({
        "id": "INT-002",
        "firstName": "Michael",
        "lastName": "Chen",
        "email": "michael.chen@company.com",
        "department": "Data Science",
        "status": "Active",
        "startDate": "2024-06-03",
        "gpa": 3.85,
        "createdAt": "2024-05-01T10:00:00Z"
    }))
    .unwrap();

    assert_eq!(record.department, Department::DataScience);
    assert_eq!(record.status, InternStatus::Active);

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["department"], "Data Science");
    assert_eq!(value["startDate"], "2024-06-03");
    assert!(value.get("endDate").is_none());
    assert!(value.get("phone").is_none());
}

#[test]
fn record_with_malformed_id_fails_to_deserialize() {
    let result: Result<InternRecord, _> = serde_json::from_value(serde_json::json!({
        "id": "X-1",
        "firstName": "Bad",
        "lastName": "Id",
        "email": "bad@example.com",
        "department": "HR",
        "status": "Pending",
        "createdAt": "2024-05-01T10:00:00Z"
    }));
    assert!(result.is_err());
}

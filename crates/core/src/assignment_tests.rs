// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn new_assignment_requires_title_and_due_date() {
    let err = serde_json::from_str::<NewAssignment>(r#"{"title": "Essay"}"#).unwrap_err();
    assert!(err.to_string().contains("dueDate"));

    let err = serde_json::from_str::<NewAssignment>(r#"{"dueDate": "2025-01-10"}"#).unwrap_err();
    assert!(err.to_string().contains("title"));
}

#[test]
fn new_assignment_decodes_camel_case() {
    let input: NewAssignment = serde_json::from_str(
        r#"{"title": "Lab", "dueDate": "2025-02-01", "type": "project", "assignedTo": "partner"}"#,
    )
    .unwrap();
    assert_eq!(input.title, "Lab");
    assert_eq!(input.due_date, "2025-02-01");
    assert_eq!(input.kind.as_deref(), Some("project"));
    assert_eq!(input.assigned_to.as_deref(), Some("partner"));
    assert_eq!(input.course, None);
}

#[test]
fn new_assignment_ignores_unknown_fields() {
    let input: NewAssignment =
        serde_json::from_str(r#"{"title": "Lab", "dueDate": "x", "id": "forged"}"#).unwrap();
    assert_eq!(input, NewAssignment::new("Lab", "x"));
}

#[test]
fn validate_rejects_empty_title() {
    let err = NewAssignment::new("", "2025-01-10").validate().unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "title"));
}

#[parameterized(
    word = { "Essay" },
    whitespace_only = { "   " },
    single_char = { "x" },
)]
fn validate_accepts_non_empty_title(title: &str) {
    assert!(NewAssignment::new(title, "2025-01-10").validate().is_ok());
}

#[test]
fn patch_changes_skip_absent_and_null() {
    let patch: AssignmentPatch =
        serde_json::from_str(r#"{"status": "done", "notes": null}"#).unwrap();
    assert_eq!(patch.changes(), vec![(Field::Status, "done")]);
    assert!(!patch.is_empty());
}

#[test]
fn empty_patch() {
    let patch: AssignmentPatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());
}

#[test]
fn patch_keeps_explicit_empty_string() {
    let patch: AssignmentPatch = serde_json::from_str(r#"{"course": ""}"#).unwrap();
    assert_eq!(patch.changes(), vec![(Field::Course, "")]);
}

#[test]
fn filter_ignores_missing_and_empty_values() {
    let filter = ListFilter {
        assigned_to: Some("you".into()),
        course: Some(String::new()),
        kind: None,
        status: Some("done".into()),
    };
    assert_eq!(
        filter.conditions(),
        vec![(Field::AssignedTo, "you"), (Field::Status, "done")]
    );
}

#[test]
fn filter_decodes_person_as_assigned_to() {
    let filter: ListFilter =
        serde_json::from_str(r#"{"person": "partner", "type": "exam"}"#).unwrap();
    assert_eq!(filter.assigned_to.as_deref(), Some("partner"));
    assert_eq!(filter.kind.as_deref(), Some("exam"));
}

#[test]
fn assignment_serializes_wire_names() {
    let assignment = Assignment {
        id: "1".into(),
        title: "Essay".into(),
        due_date: "2025-01-10".into(),
        course: "".into(),
        kind: "homework".into(),
        assigned_to: "you".into(),
        priority: "medium".into(),
        status: "upcoming".into(),
        notes: "".into(),
        created_at: "t".into(),
        updated_at: "t".into(),
    };
    let value = serde_json::to_value(&assignment).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for field in Field::ALL {
        assert!(keys.contains(&field.wire_name()), "missing {field}");
    }
    assert_eq!(keys.len(), Field::ALL.len());
}

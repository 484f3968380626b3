// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process tests for the HTTP surface.
//!
//! Requests go straight through the router over an in-memory SQLite store.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use ac_core::{Assignment, SqliteStore};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use yare::parameterized;

use crate::server::router;
use crate::state::ServerState;

fn app() -> Router {
    router(ServerState::new(Arc::new(SqliteStore::in_memory())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

async fn create(app: &Router, body: Value) -> Assignment {
    let (status, bytes) = send(app, Method::POST, "/api/assignments", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

async fn list(app: &Router, uri: &str) -> Vec<Assignment> {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

fn detail(bytes: &[u8]) -> String {
    let value: Value = serde_json::from_slice(bytes).unwrap();
    value["detail"].as_str().unwrap().to_string()
}

async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, bytes) = send(&app(), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn minimal_create_round_trips_with_defaults() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "2025-01-10" })).await;

    let (status, bytes) = send(
        &app,
        Method::GET,
        &format!("/api/assignments/{}", created.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["id"], json!(created.id));
    assert_eq!(body["title"], "Essay");
    assert_eq!(body["dueDate"], "2025-01-10");
    assert_eq!(body["course"], "");
    assert_eq!(body["type"], "homework");
    assert_eq!(body["assignedTo"], "you");
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["status"], "upcoming");
    assert_eq!(body["notes"], "");
    assert_eq!(body["createdAt"], body["updatedAt"]);
    assert!(body["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn create_keeps_supplied_fields() {
    let app = app();
    let created = create(
        &app,
        json!({
            "title": "Lab report",
            "dueDate": "2025-02-01",
            "course": "CHEM 101",
            "type": "lab",
            "assignedTo": "sam",
            "priority": "high",
            "status": "in-progress",
            "notes": "bring goggles",
        }),
    )
    .await;

    assert_eq!(created.course, "CHEM 101");
    assert_eq!(created.kind, "lab");
    assert_eq!(created.assigned_to, "sam");
    assert_eq!(created.priority, "high");
    assert_eq!(created.status, "in-progress");
    assert_eq!(created.notes, "bring goggles");
}

#[tokio::test]
async fn create_ignores_caller_id_and_timestamps() {
    let app = app();
    let created = create(
        &app,
        json!({
            "id": "chosen-by-client",
            "title": "Essay",
            "dueDate": "2025-01-10",
            "createdAt": "1999-01-01T00:00:00.000000Z",
        }),
    )
    .await;
    assert_ne!(created.id, "chosen-by-client");
    assert_ne!(created.created_at, "1999-01-01T00:00:00.000000Z");
}

#[tokio::test]
async fn created_ids_are_unique() {
    let app = app();
    let mut ids = HashSet::new();
    for i in 0..5 {
        let created = create(&app, json!({ "title": format!("Task {i}"), "dueDate": "soon" })).await;
        ids.insert(created.id);
    }
    assert_eq!(ids.len(), 5);
}

#[parameterized(
    missing_title = { json!({ "dueDate": "2025-01-10" }) },
    missing_due_date = { json!({ "title": "Essay" }) },
    empty_title = { json!({ "title": "", "dueDate": "2025-01-10" }) },
    wrong_type = { json!({ "title": 7, "dueDate": "2025-01-10" }) },
)]
#[test_macro(tokio::test)]
async fn create_rejects_invalid_bodies(body: Value) {
    let app = app();
    let (status, bytes) = send(&app, Method::POST, "/api/assignments", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!detail(&bytes).is_empty());
    assert!(list(&app, "/api/assignments").await.is_empty());
}

#[tokio::test]
async fn whitespace_title_is_accepted() {
    let created = create(&app(), json!({ "title": "  ", "dueDate": "2025-01-10" })).await;
    assert_eq!(created.title, "  ");
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let status = send_raw(&app(), Method::POST, "/api/assignments", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = app();
    let mut expected = Vec::new();
    for title in ["first", "second", "third"] {
        expected.push(create(&app, json!({ "title": title, "dueDate": "d" })).await.id);
        tick().await;
    }
    expected.reverse();

    let listed = list(&app, "/api/assignments").await;
    let ids: Vec<_> = listed.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids, expected);
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let (status, bytes) = send(&app(), Method::GET, "/api/assignments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!([]));
}

#[tokio::test]
async fn status_filter_returns_exact_matches() {
    let app = app();
    create(&app, json!({ "title": "a", "dueDate": "d", "status": "done" })).await;
    create(&app, json!({ "title": "b", "dueDate": "d" })).await;
    create(&app, json!({ "title": "c", "dueDate": "d", "status": "done" })).await;
    create(&app, json!({ "title": "d", "dueDate": "d", "status": "done-ish" })).await;

    let done = list(&app, "/api/assignments?status=done").await;
    assert_eq!(done.len(), 2);
    assert!(done.iter().all(|a| a.status == "done"));
}

#[tokio::test]
async fn filters_combine_as_conjunction() {
    let app = app();
    create(
        &app,
        json!({ "title": "a", "dueDate": "d", "assignedTo": "sam", "course": "MATH", "type": "quiz" }),
    )
    .await;
    create(&app, json!({ "title": "b", "dueDate": "d", "assignedTo": "sam", "course": "BIO" })).await;
    create(&app, json!({ "title": "c", "dueDate": "d", "course": "MATH", "type": "quiz" })).await;

    let hits = list(&app, "/api/assignments?person=sam&course=MATH&type=quiz").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "a");

    let sams = list(&app, "/api/assignments?person=sam").await;
    assert_eq!(sams.len(), 2);
}

#[tokio::test]
async fn rejected_query_uses_detail_body() {
    let (status, bytes) = send(&app(), Method::GET, "/api/assignments?status=a&status=b", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&bytes).contains("status"));
}

#[tokio::test]
async fn empty_filter_value_is_ignored() {
    let app = app();
    create(&app, json!({ "title": "a", "dueDate": "d" })).await;
    create(&app, json!({ "title": "b", "dueDate": "d", "course": "BIO" })).await;

    assert_eq!(list(&app, "/api/assignments?course=").await.len(), 2);
}

#[tokio::test]
async fn patch_changes_only_named_field_and_updated_at() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "2025-01-10" })).await;
    tick().await;

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/assignments/{}", created.id),
        Some(json!({ "status": "done" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Assignment = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(updated.status, "done");
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(
        Assignment {
            status: created.status.clone(),
            updated_at: created.updated_at.clone(),
            ..updated.clone()
        },
        created
    );
}

#[tokio::test]
async fn patch_nulls_leave_fields_alone() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "2025-01-10", "notes": "n" })).await;

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/assignments/{}", created.id),
        Some(json!({ "notes": null, "priority": "low" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Assignment = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated.notes, "n");
    assert_eq!(updated.priority, "low");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn empty_patch_still_refreshes_updated_at() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "d" })).await;
    tick().await;

    let (status, bytes) = send(
        &app,
        Method::PUT,
        &format!("/api/assignments/{}", created.id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Assignment = serde_json::from_slice(&bytes).unwrap();
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.title, created.title);
}

#[tokio::test]
async fn update_rejects_malformed_body() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "d" })).await;
    let status = send_raw(
        &app,
        Method::PUT,
        &format!("/api/assignments/{}", created.id),
        "[1, 2",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[parameterized(
    get = { Method::GET, None },
    put = { Method::PUT, Some(json!({ "status": "done" })) },
    delete = { Method::DELETE, None },
)]
#[test_macro(tokio::test)]
async fn missing_id_is_not_found(method: Method, body: Option<Value>) {
    let (status, bytes) = send(&app(), method, "/api/assignments/no-such-id", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(detail(&bytes), "Assignment not found");
}

#[tokio::test]
async fn delete_twice_is_no_content_then_not_found() {
    let app = app();
    let created = create(&app, json!({ "title": "Essay", "dueDate": "d" })).await;
    let uri = format!("/api/assignments/{}", created.id);

    let (first, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (second, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(second, StatusCode::NOT_FOUND);

    let (fetch, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetch, StatusCode::NOT_FOUND);
}

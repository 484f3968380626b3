// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP server implementation.
//!
//! Routes the assignment API onto the service:
//!
//! | Method | Path                    | Success             |
//! |--------|-------------------------|---------------------|
//! | GET    | `/api/health`           | 200 `{"status":"ok"}` |
//! | GET    | `/api/assignments`      | 200 list            |
//! | POST   | `/api/assignments`      | 201 record          |
//! | GET    | `/api/assignments/:id`  | 200 record          |
//! | PUT    | `/api/assignments/:id`  | 200 record          |
//! | DELETE | `/api/assignments/:id`  | 204 empty           |

use std::future::Future;
use std::net::SocketAddr;

use ac_core::{Assignment, AssignmentPatch, ListFilter, NewAssignment};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::ApiError;
use crate::state::ServerState;

/// Builds the application router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/assignments",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/api/assignments/:id",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
        .with_state(state)
}

/// Run the HTTP server on the given address until `shutdown` resolves.
pub async fn run(
    addr: SocketAddr,
    state: ServerState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_assignments(
    State(state): State<ServerState>,
    query: Result<Query<ListFilter>, QueryRejection>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let Query(filter) = query?;
    let assignments = state.service().list(&filter).await?;
    Ok(Json(assignments))
}

async fn get_assignment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Assignment>, ApiError> {
    Ok(Json(state.service().get(&id).await?))
}

async fn create_assignment(
    State(state): State<ServerState>,
    payload: Result<Json<NewAssignment>, JsonRejection>,
) -> Result<(StatusCode, Json<Assignment>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let assignment = state.service().create(input).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn update_assignment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<AssignmentPatch>, JsonRejection>,
) -> Result<Json<Assignment>, ApiError> {
    let Json(patch) = payload?;
    Ok(Json(state.service().update(&id, &patch).await?))
}

async fn delete_assignment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

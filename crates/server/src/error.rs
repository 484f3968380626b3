// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping from service errors to HTTP responses.
//!
//! Bodies are `{"detail": "..."}`. Store failures are logged here and reach
//! the client only as a generic 500.

use ac_core::Error;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

pub(crate) const NOT_FOUND_DETAIL: &str = "Assignment not found";
pub(crate) const INTERNAL_DETAIL: &str = "Internal server error";

/// Failure of one API request.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The service rejected or failed the operation.
    Service(Error),
    /// The request body or query string could not be decoded.
    Rejected(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_detail(self) -> (StatusCode, String) {
        match self {
            ApiError::Service(Error::NotFound(id)) => {
                debug!(id, "assignment not found");
                (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string())
            }
            ApiError::Service(Error::Validation { field, message }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, format!("{field}: {message}"))
            }
            ApiError::Service(err) => {
                if err.is_store_error() {
                    error!("store failure: {}", err);
                } else {
                    error!("unexpected service error: {}", err);
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_DETAIL.to_string(),
                )
            }
            ApiError::Rejected(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

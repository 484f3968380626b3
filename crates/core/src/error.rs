// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ac-core operations.

use thiserror::Error;

/// All possible errors that can occur in ac-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("assignment not found: {0}")]
    NotFound(String),

    #[error("invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Builds a validation error for a single request field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for failures of the backing store rather than the request.
    ///
    /// These surface to HTTP callers as an opaque internal error.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Mongo(_) | Error::Io(_)
        )
    }
}

/// A specialized Result type for ac-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record storage.
//!
//! [`RecordStore`] is the single persistence interface the service depends
//! on. Two implementations exist: [`SqliteStore`] for an embedded database
//! file and [`MongoStore`] for a MongoDB collection. Which one runs is decided
//! at startup by [`StoreSettings`].
//!
//! Every store owns exactly one physical handle. It is created lazily on
//! first use behind a mutex, so concurrent first callers still create only
//! one, and [`RecordStore::close`] drops it so the next call reconnects.

mod mongo;
mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::assignment::ListFilter;
use crate::error::Result;
use crate::mapper::{Naming, RawRecord, StorageFields};

pub use mongo::MongoStore;
pub use sqlite::SqliteStore;

/// Persistence operations over assignment records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// How this store names fields.
    fn naming(&self) -> Naming;

    /// Establishes the handle if needed and ensures the schema exists.
    async fn open(&self) -> Result<()>;

    /// Releases the handle. A later call reconnects.
    async fn close(&self) -> Result<()>;

    /// Returns matching records, newest `createdAt` first.
    async fn find(&self, filter: &ListFilter) -> Result<Vec<RawRecord>>;

    /// Returns the record with the given id, if any.
    async fn find_one(&self, id: &str) -> Result<Option<RawRecord>>;

    /// Writes a new record.
    async fn insert(&self, fields: StorageFields) -> Result<()>;

    /// Sets the given fields on one record. Returns how many records matched.
    async fn update_partial(&self, id: &str, fields: StorageFields) -> Result<u64>;

    /// Removes one record. Returns how many were removed.
    async fn delete(&self, id: &str) -> Result<u64>;
}

/// Backend selection and connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreSettings {
    Sqlite {
        #[serde(default = "default_sqlite_path")]
        path: PathBuf,
    },
    Mongodb {
        #[serde(default = "default_mongo_uri")]
        uri: String,
        #[serde(default = "default_mongo_database")]
        database: String,
        #[serde(default = "default_mongo_collection")]
        collection: String,
    },
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings::Sqlite {
            path: default_sqlite_path(),
        }
    }
}

impl StoreSettings {
    /// Short backend name for logging.
    pub fn backend(&self) -> &'static str {
        match self {
            StoreSettings::Sqlite { .. } => "sqlite",
            StoreSettings::Mongodb { .. } => "mongodb",
        }
    }
}

pub fn default_sqlite_path() -> PathBuf {
    PathBuf::from("assigncal.db")
}

pub fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

pub fn default_mongo_database() -> String {
    "assigncal".to_string()
}

pub fn default_mongo_collection() -> String {
    "assignments".to_string()
}

/// Builds the configured store. No connection is made until first use.
pub fn build_store(settings: &StoreSettings) -> Arc<dyn RecordStore> {
    match settings {
        StoreSettings::Sqlite { path } => Arc::new(SqliteStore::new(path)),
        StoreSettings::Mongodb {
            uri,
            database,
            collection,
        } => Arc::new(MongoStore::new(uri, database, collection)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

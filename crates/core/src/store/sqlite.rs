// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed record store.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::RecordStore;
use crate::assignment::{Field, ListFilter};
use crate::error::Result;
use crate::mapper::{Naming, RawRecord, Scalar, StorageFields};

const NAMING: Naming = Naming::Relational;

/// SQL schema for the assignments table.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS assignments (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    due_date TEXT NOT NULL,
    course TEXT DEFAULT '',
    type TEXT DEFAULT 'homework',
    assigned_to TEXT DEFAULT 'you',
    priority TEXT DEFAULT 'medium',
    status TEXT DEFAULT 'upcoming',
    notes TEXT DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Record store over a single SQLite connection.
pub struct SqliteStore {
    location: Location,
    conn: Mutex<Option<Connection>>,
    /// Number of physical connections opened over the store's lifetime.
    opened: AtomicU64,
}

impl SqliteStore {
    /// Creates a store for the database file at `path`.
    pub fn new(path: &Path) -> Self {
        Self::with_location(Location::File(path.to_path_buf()))
    }

    /// Creates a store over a private in-memory database (for testing).
    ///
    /// Closing the store discards its contents.
    pub fn in_memory() -> Self {
        Self::with_location(Location::Memory)
    }

    fn with_location(location: Location) -> Self {
        SqliteStore {
            location,
            conn: Mutex::new(None),
            opened: AtomicU64::new(0),
        }
    }

    fn connect(&self) -> Result<Connection> {
        let conn = match &self.location {
            Location::File(path) => {
                // Ensure parent directory exists
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let conn = Connection::open(path)?;
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA busy_timeout = 5000;",
                )?;
                conn
            }
            Location::Memory => Connection::open_in_memory()?,
        };
        conn.execute_batch(SCHEMA)?;

        let count = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.location {
            Location::File(path) => {
                info!(path = %path.display(), count, "opened sqlite database")
            }
            Location::Memory => debug!(count, "opened in-memory sqlite database"),
        }
        Ok(conn)
    }

    /// Runs `f` against the shared connection, opening it first if needed.
    async fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T> + Send) -> Result<T> {
        let mut guard = self.conn.lock().await;
        let conn = match guard.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };
        let result = f(&conn);
        *guard = Some(conn);
        result
    }
}

fn column_list() -> String {
    Field::ALL
        .iter()
        .map(|field| NAMING.storage_name(*field))
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    let mut raw = RawRecord::new();
    for (index, field) in Field::ALL.iter().enumerate() {
        let value: Value = row.get(index)?;
        raw.insert(NAMING.storage_name(*field), Scalar::from(value));
    }
    Ok(raw)
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Integer(i) => Scalar::Integer(i),
            Value::Real(f) => Scalar::Real(f),
            Value::Text(s) => Scalar::Text(s),
            Value::Blob(b) => Scalar::Bytes(b),
        }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    fn naming(&self) -> Naming {
        NAMING
    }

    async fn open(&self) -> Result<()> {
        self.with_conn(|_| Ok(())).await
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| e)?;
            debug!("closed sqlite connection");
        }
        Ok(())
    }

    async fn find(&self, filter: &ListFilter) -> Result<Vec<RawRecord>> {
        let mut sql = format!("SELECT {} FROM assignments", column_list());

        let mut conditions = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();
        for (field, value) in filter.conditions() {
            conditions.push(format!("{} = ?", NAMING.storage_name(field)));
            params_vec.push(value.to_string());
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY created_at DESC");

        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(params_from_iter(params_vec.iter()), read_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
    }

    async fn find_one(&self, id: &str) -> Result<Option<RawRecord>> {
        let sql = format!("SELECT {} FROM assignments WHERE id = ?1", column_list());
        self.with_conn(move |conn| Ok(conn.query_row(&sql, [id], read_row).optional()?))
            .await
    }

    async fn insert(&self, fields: StorageFields) -> Result<()> {
        let columns: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<String> = (1..=fields.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO assignments ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        self.with_conn(move |conn| {
            conn.execute(&sql, params_from_iter(fields.iter().map(|(_, value)| value)))?;
            Ok(())
        })
        .await
    }

    async fn update_partial(&self, id: &str, fields: StorageFields) -> Result<u64> {
        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, (name, _))| format!("{name} = ?{}", i + 1))
            .collect();
        let sql = format!(
            "UPDATE assignments SET {} WHERE id = ?{}",
            assignments.join(", "),
            fields.len() + 1
        );

        self.with_conn(move |conn| {
            let values = fields
                .iter()
                .map(|(_, value)| value.as_str())
                .chain(std::iter::once(id));
            let affected = conn.execute(&sql, params_from_iter(values))?;
            Ok(affected as u64)
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.with_conn(move |conn| {
            let affected = conn.execute("DELETE FROM assignments WHERE id = ?1", [id])?;
            Ok(affected as u64)
        })
        .await
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;

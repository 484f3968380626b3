// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Translation between wire records and storage records.
//!
//! Each store names fields through a [`Naming`]: the document store keeps the
//! camelCase wire names, the relational store uses snake_case columns. Reads
//! go through [`from_storage`], which coerces every value to a string and turns
//! null or missing values into `""`. Both stores share this path so their wire
//! output is identical.

use std::collections::HashMap;

use crate::assignment::{Assignment, AssignmentPatch, Field, NewAssignment};

pub const DEFAULT_COURSE: &str = "";
pub const DEFAULT_TYPE: &str = "homework";
pub const DEFAULT_ASSIGNED_TO: &str = "you";
pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_STATUS: &str = "upcoming";
pub const DEFAULT_NOTES: &str = "";

/// How a backing store names record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// Field names match the wire names.
    Document,
    /// Field names are snake_case columns.
    Relational,
}

impl Naming {
    /// Returns the storage name for a field.
    pub fn storage_name(self, field: Field) -> &'static str {
        match self {
            Naming::Document => field.wire_name(),
            Naming::Relational => match field {
                Field::DueDate => "due_date",
                Field::AssignedTo => "assigned_to",
                Field::CreatedAt => "created_at",
                Field::UpdatedAt => "updated_at",
                other => other.wire_name(),
            },
        }
    }
}

/// A stored value, independent of the backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Bytes(Vec<u8>),
}

impl Scalar {
    /// Coerces the value to its wire string.
    ///
    /// Null becomes `""`, never `"null"` or `"0"`.
    pub fn into_wire_string(self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Text(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Real(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// A record as read from a store, keyed by storage name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: HashMap<String, Scalar>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Scalar) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.values.get(name)
    }

    fn take(&mut self, name: &str) -> Scalar {
        self.values.remove(name).unwrap_or(Scalar::Null)
    }
}

impl FromIterator<(String, Scalar)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, Scalar)>>(iter: I) -> Self {
        RawRecord {
            values: iter.into_iter().collect(),
        }
    }
}

/// Storage-shaped field values, in write order.
pub type StorageFields = Vec<(&'static str, String)>;

/// Builds a full record from a create payload, filling every optional field.
pub fn with_defaults(input: NewAssignment, id: String, now: String) -> Assignment {
    Assignment {
        id,
        title: input.title,
        due_date: input.due_date,
        course: input.course.unwrap_or_else(|| DEFAULT_COURSE.to_string()),
        kind: input.kind.unwrap_or_else(|| DEFAULT_TYPE.to_string()),
        assigned_to: input
            .assigned_to
            .unwrap_or_else(|| DEFAULT_ASSIGNED_TO.to_string()),
        priority: input
            .priority
            .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        notes: input.notes.unwrap_or_else(|| DEFAULT_NOTES.to_string()),
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Renames every field of a record to its storage name.
pub fn to_storage(assignment: &Assignment, naming: Naming) -> StorageFields {
    Field::ALL
        .into_iter()
        .map(|field| {
            (
                naming.storage_name(field),
                assignment.get(field).to_string(),
            )
        })
        .collect()
}

/// Storage-shaped values for a partial update.
///
/// Always includes `updatedAt`, even when the patch is empty.
pub fn patch_to_storage(patch: &AssignmentPatch, updated_at: &str, naming: Naming) -> StorageFields {
    let mut fields: StorageFields = patch
        .changes()
        .into_iter()
        .map(|(field, value)| (naming.storage_name(field), value.to_string()))
        .collect();
    fields.push((naming.storage_name(Field::UpdatedAt), updated_at.to_string()));
    fields
}

/// Converts a stored record back to wire shape.
pub fn from_storage(mut raw: RawRecord, naming: Naming) -> Assignment {
    let mut assignment = Assignment::default();
    for field in Field::ALL {
        *assignment.get_mut(field) = raw.take(naming.storage_name(field)).into_wire_string();
    }
    assignment
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;

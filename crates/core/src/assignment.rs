// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment record types.
//!
//! [`Assignment`] is the full record as it appears on the wire. Create and
//! update payloads decode into [`NewAssignment`] and [`AssignmentPatch`];
//! list queries into [`ListFilter`]. All wire names are camelCase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// One field of the assignment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    DueDate,
    Course,
    Type,
    AssignedTo,
    Priority,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

impl Field {
    /// Every field, in wire order.
    pub const ALL: [Field; 11] = [
        Field::Id,
        Field::Title,
        Field::DueDate,
        Field::Course,
        Field::Type,
        Field::AssignedTo,
        Field::Priority,
        Field::Status,
        Field::Notes,
        Field::CreatedAt,
        Field::UpdatedAt,
    ];

    /// Returns the camelCase name used in JSON bodies.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::DueDate => "dueDate",
            Field::Course => "course",
            Field::Type => "type",
            Field::AssignedTo => "assignedTo",
            Field::Priority => "priority",
            Field::Status => "status",
            Field::Notes => "notes",
            Field::CreatedAt => "createdAt",
            Field::UpdatedAt => "updatedAt",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// A stored assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub course: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub assigned_to: String,
    pub priority: String,
    pub status: String,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Assignment {
    /// Returns the value of a field by name.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::DueDate => &self.due_date,
            Field::Course => &self.course,
            Field::Type => &self.kind,
            Field::AssignedTo => &self.assigned_to,
            Field::Priority => &self.priority,
            Field::Status => &self.status,
            Field::Notes => &self.notes,
            Field::CreatedAt => &self.created_at,
            Field::UpdatedAt => &self.updated_at,
        }
    }

    /// Mutable access to a field by name.
    pub(crate) fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::DueDate => &mut self.due_date,
            Field::Course => &mut self.course,
            Field::Type => &mut self.kind,
            Field::AssignedTo => &mut self.assigned_to,
            Field::Priority => &mut self.priority,
            Field::Status => &mut self.status,
            Field::Notes => &mut self.notes,
            Field::CreatedAt => &mut self.created_at,
            Field::UpdatedAt => &mut self.updated_at,
        }
    }
}

/// Payload for creating an assignment.
///
/// `title` and `dueDate` are required; everything else falls back to the
/// defaults in [`crate::mapper`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
    pub title: String,
    pub due_date: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewAssignment {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        NewAssignment {
            title: title.into(),
            due_date: due_date.into(),
            ..Default::default()
        }
    }

    /// Checks the fields decoding alone cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(Error::validation(Field::Title.wire_name(), "must not be empty"));
        }
        Ok(())
    }
}

/// Partial update payload. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub course: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl AssignmentPatch {
    /// Returns the supplied fields and their new values.
    pub fn changes(&self) -> Vec<(Field, &str)> {
        [
            (Field::Title, &self.title),
            (Field::DueDate, &self.due_date),
            (Field::Course, &self.course),
            (Field::Type, &self.kind),
            (Field::AssignedTo, &self.assigned_to),
            (Field::Priority, &self.priority),
            (Field::Status, &self.status),
            (Field::Notes, &self.notes),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    /// Returns true if the patch changes nothing but `updatedAt`.
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

/// Exact-match list filters, combined with AND.
///
/// Missing and empty values impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListFilter {
    /// Matches `assignedTo`. Named `person` on the query string.
    #[serde(rename = "person")]
    pub assigned_to: Option<String>,
    pub course: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
}

impl ListFilter {
    /// Returns the active conditions as field/value pairs.
    pub fn conditions(&self) -> Vec<(Field, &str)> {
        [
            (Field::AssignedTo, &self.assigned_to),
            (Field::Course, &self.course),
            (Field::Type, &self.kind),
            (Field::Status, &self.status),
        ]
        .into_iter()
        .filter_map(|(field, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((field, v)),
            _ => None,
        })
        .collect()
    }
}

#[cfg(test)]
#[path = "assignment_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment CRUD operations.
//!
//! [`AssignmentService`] stamps ids and timestamps, applies defaults, and
//! turns missing records into [`Error::NotFound`]. It sees storage only
//! through [`RecordStore`].
//!
//! Update and delete check existence and then mutate without a surrounding
//! transaction. If a concurrent delete wins the race, the mutation matches
//! nothing and the caller gets `NotFound`.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::assignment::{Assignment, AssignmentPatch, ListFilter, NewAssignment};
use crate::clock::{timestamp, ClockSource, SystemClock};
use crate::error::{Error, Result};
use crate::mapper::{from_storage, patch_to_storage, to_storage, with_defaults};
use crate::store::RecordStore;

/// CRUD operations over a record store.
#[derive(Clone)]
pub struct AssignmentService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn ClockSource>,
}

impl AssignmentService {
    /// Creates a service using the system clock.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service with a custom clock source.
    pub fn with_clock(store: Arc<dyn RecordStore>, clock: Arc<dyn ClockSource>) -> Self {
        AssignmentService { store, clock }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Lists records matching every supplied filter, newest first.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Assignment>> {
        let naming = self.store.naming();
        let records = self.store.find(filter).await?;
        debug!(count = records.len(), ?filter, "listed assignments");
        Ok(records
            .into_iter()
            .map(|raw| from_storage(raw, naming))
            .collect())
    }

    /// Fetches one record.
    pub async fn get(&self, id: &str) -> Result<Assignment> {
        let raw = self.store.find_one(id).await?;
        raw.map(|raw| from_storage(raw, self.store.naming()))
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Creates a record with a fresh id and matching created/updated stamps.
    pub async fn create(&self, input: NewAssignment) -> Result<Assignment> {
        let id = Uuid::new_v4().to_string();
        let now = timestamp(self.clock.as_ref());
        let assignment = with_defaults(input, id, now);

        self.store
            .insert(to_storage(&assignment, self.store.naming()))
            .await?;
        debug!(id = %assignment.id, "created assignment");
        Ok(assignment)
    }

    /// Applies a partial update and returns the record as stored afterwards.
    ///
    /// `updatedAt` is refreshed even when the patch is empty.
    pub async fn update(&self, id: &str, patch: &AssignmentPatch) -> Result<Assignment> {
        if self.store.find_one(id).await?.is_none() {
            return Err(Error::NotFound(id.to_string()));
        }

        let now = timestamp(self.clock.as_ref());
        let fields = patch_to_storage(patch, &now, self.store.naming());
        let matched = self.store.update_partial(id, fields).await?;
        if matched == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        debug!(id, touch_only = patch.is_empty(), "updated assignment");

        self.get(id).await
    }

    /// Deletes a record.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.find_one(id).await?.is_none() {
            return Err(Error::NotFound(id.to_string()));
        }

        let removed = self.store.delete(id).await?;
        if removed == 0 {
            return Err(Error::NotFound(id.to_string()));
        }
        debug!(id, "deleted assignment");
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

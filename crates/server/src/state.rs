// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the assignment service for sharing across request handlers.

use std::sync::Arc;

use ac_core::{AssignmentService, RecordStore};

/// Shared server state handed to every request handler.
#[derive(Clone)]
pub struct ServerState {
    service: AssignmentService,
}

impl ServerState {
    /// Creates server state over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        ServerState {
            service: AssignmentService::new(store),
        }
    }

    pub fn service(&self) -> &AssignmentService {
        &self.service
    }
}

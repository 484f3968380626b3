// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ac-core: Shared library for the AssignCal assignment tracker
//!
//! This crate provides the record types, storage backends, and CRUD service
//! used by the AssignCal HTTP server.

pub mod assignment;
pub mod clock;
pub mod error;
pub mod mapper;
pub mod service;
pub mod store;

pub use assignment::{Assignment, AssignmentPatch, Field, ListFilter, NewAssignment};
pub use clock::{ClockSource, SystemClock};
pub use error::{Error, Result};
pub use service::AssignmentService;
pub use store::{build_store, MongoStore, RecordStore, SqliteStore, StoreSettings};

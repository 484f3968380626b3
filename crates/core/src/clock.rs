// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock access and record timestamp formatting.
//!
//! Timestamps are UTC with microsecond precision and a `Z` suffix, e.g.
//! `2025-01-10T09:30:00.000000Z`. The width is fixed, so string order is
//! chronological order, which the stores rely on for `createdAt` sorting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait ClockSource: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation backed by [`Utc::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats a time as a record timestamp.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Returns the clock's current time as a record timestamp.
pub fn timestamp(clock: &dyn ClockSource) -> String {
    format_timestamp(clock.now())
}

#[cfg(test)]
pub(crate) use tests::ManualClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! Every variable the server reads is named in [`names`].

use std::path::PathBuf;

/// Environment variable names.
pub mod names {
    /// Path to the TOML config file.
    pub const ASSIGNCAL_CONFIG: &str = "ASSIGNCAL_CONFIG";

    /// MongoDB connection string, kept out of config files.
    pub const ASSIGNCAL_MONGO_URI: &str = "ASSIGNCAL_MONGO_URI";

    /// Log filter read by tracing-subscriber.
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Returns the value of `ASSIGNCAL_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(names::ASSIGNCAL_CONFIG)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns the value of `ASSIGNCAL_MONGO_URI` if set.
pub fn mongo_uri() -> Option<String> {
    std::env::var(names::ASSIGNCAL_MONGO_URI)
        .ok()
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

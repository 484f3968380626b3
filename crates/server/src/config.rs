// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Settings come from an optional TOML file, then command-line flags, then
//! `ASSIGNCAL_MONGO_URI`:
//!
//! ```toml
//! bind = "0.0.0.0:8000"
//!
//! [store]
//! backend = "sqlite"
//! path = "assigncal.db"
//! ```

use ac_core::store::{
    default_mongo_collection, default_mongo_database, default_mongo_uri, default_sqlite_path,
};
use ac_core::{Error, Result, StoreSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::{env, Args, Backend};

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Storage backend and connection settings.
    #[serde(default)]
    pub store: StoreSettings,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: default_bind(),
            store: StoreSettings::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Applies command-line flags and the environment on top of file values.
    pub fn apply(&mut self, args: &Args, env_mongo_uri: Option<String>) -> Result<()> {
        if let Some(bind) = args.bind {
            self.bind = bind;
        }

        match (args.backend, &self.store) {
            (Some(Backend::Sqlite), StoreSettings::Mongodb { .. }) => {
                self.store = StoreSettings::Sqlite {
                    path: default_sqlite_path(),
                };
            }
            (Some(Backend::Mongodb), StoreSettings::Sqlite { .. }) => {
                self.store = StoreSettings::Mongodb {
                    uri: default_mongo_uri(),
                    database: default_mongo_database(),
                    collection: default_mongo_collection(),
                };
            }
            _ => {}
        }

        match &mut self.store {
            StoreSettings::Sqlite { path } => {
                if args.mongo_uri.is_some() {
                    return Err(Error::Config(
                        "--mongo-uri requires the mongodb backend".to_string(),
                    ));
                }
                if let Some(db_path) = &args.db_path {
                    *path = db_path.clone();
                }
            }
            StoreSettings::Mongodb { uri, .. } => {
                if args.db_path.is_some() {
                    return Err(Error::Config(
                        "--db-path requires the sqlite backend".to_string(),
                    ));
                }
                if let Some(value) = args.mongo_uri.clone().or(env_mongo_uri) {
                    *uri = value;
                }
            }
        }

        Ok(())
    }
}

/// Builds the effective configuration for this process.
pub fn resolve(args: &Args) -> Result<Config> {
    let mut config = match args.config.clone().or_else(env::config_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.apply(args, env::mongo_uri())?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

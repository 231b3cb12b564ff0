use std::fmt;
use std::str::FromStr;

use movies_core::config::{parse_var_or, var_or, ConfigError};

/// Which [`MovieStore`](crate::MovieStore) implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected mongodb or memory)")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MongoDb => f.write_str("mongodb"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// MongoDB connection string (default: `mongodb://localhost:27017`).
    pub uri: String,
    /// Database holding the `movies` collection (default: `movies_db`).
    pub database: String,
}

impl StoreConfig {
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `STORE_BACKEND`    | `mongodb`                   |
    /// | `MONGODB_URI`      | `mongodb://localhost:27017` |
    /// | `MONGODB_DATABASE` | `movies_db`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            backend: parse_var_or(&lookup, "STORE_BACKEND", StoreBackend::MongoDb)?,
            uri: var_or(&lookup, "MONGODB_URI", "mongodb://localhost:27017"),
            database: var_or(&lookup, "MONGODB_DATABASE", "movies_db"),
        })
    }
}

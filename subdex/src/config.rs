//! Runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services,
//! so request handling never reads process-wide environment variables.

use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_DATABASE: &str = "app_db";
pub const DEFAULT_COLLECTION: &str = "substances";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    Missing(&'static str),
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("unknown store {0:?}, expected \"mongodb\" or \"memory\"")]
    UnknownStore(String),
    #[error("the mongodb store was selected but this build does not include the mongodb feature")]
    MongoDbDisabled,
}

/// Which backend serves the substance collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    MongoDb { url: String, database: String },
    Memory { seed_file: Option<PathBuf> },
}

/// Service configuration resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub collection: String,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, treating empty values as unset.
    ///
    /// Recognised keys: `SUBDEX_BIND_ADDR`, `SUBDEX_STORE` (`mongodb` or `memory`),
    /// `MONGO_URL`, `MONGO_DATABASE`, `MONGO_COLLECTION`, `SUBDEX_SEED_FILE`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_value = get("SUBDEX_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind_value.clone(), source })?;

        let store = match get("SUBDEX_STORE").as_deref().unwrap_or("mongodb") {
            "mongodb" => StoreConfig::MongoDb {
                url: get("MONGO_URL").ok_or(ConfigError::Missing("MONGO_URL"))?,
                database: get("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            },
            "memory" => StoreConfig::Memory {
                seed_file: get("SUBDEX_SEED_FILE").map(PathBuf::from),
            },
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self {
            bind_addr,
            collection: get("MONGO_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            store,
        })
    }
}

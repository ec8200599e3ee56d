//! Opening the configured store at startup.

use std::path::Path;

use bson::{Bson, Document};
use subdex_core::{backend::StoreBackendBuilder, store::DocumentStore};
use subdex_memory::InMemoryStore;

use crate::{
    config::{AppConfig, StoreConfig},
    error::StartupError,
};

/// Builds the single store handle the process serves from.
///
/// For MongoDB only the connection string is validated here; the driver connects on
/// first use.
pub async fn open_store(config: &AppConfig) -> Result<DocumentStore, StartupError> {
    match &config.store {
        StoreConfig::MongoDb { url, database } => open_mongodb(url, database).await,
        StoreConfig::Memory { seed_file } => {
            let mut builder = InMemoryStore::builder();

            if let Some(path) = seed_file {
                let documents = read_seed_file(path).await?;
                tracing::info!(path = %path.display(), count = documents.len(), "seeding in-memory store");
                builder = builder.seed(config.collection.clone(), documents);
            }

            Ok(DocumentStore::new(builder.build().await?))
        }
    }
}

#[cfg(feature = "mongodb")]
async fn open_mongodb(url: &str, database: &str) -> Result<DocumentStore, StartupError> {
    let backend = subdex_mongodb::MongoDbStore::builder(url, database).build().await?;
    tracing::info!(database, "using mongodb store");

    Ok(DocumentStore::new(backend))
}

#[cfg(not(feature = "mongodb"))]
async fn open_mongodb(_url: &str, _database: &str) -> Result<DocumentStore, StartupError> {
    Err(crate::config::ConfigError::MongoDbDisabled.into())
}

/// Reads a JSON array of substance records.
async fn read_seed_file(path: &Path) -> Result<Vec<Bson>, StartupError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StartupError::SeedRead { path: path.to_path_buf(), source })?;

    let documents: Vec<Document> = serde_json::from_slice(&bytes)
        .map_err(|source| StartupError::SeedFormat { path: path.to_path_buf(), source })?;

    Ok(documents.into_iter().map(Bson::Document).collect())
}

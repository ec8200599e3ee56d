//! Shared test fixtures: a seeded in-memory store and a backend that always fails.

use async_trait::async_trait;
use bson::{Bson, doc};
use subdex_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, Query},
    store::DocumentStore,
};
use subdex_memory::InMemoryStore;

use crate::{config::DEFAULT_COLLECTION, service::SubstanceService};

pub fn sample_substances() -> Vec<Bson> {
    [
        doc! {
            "name": "Caffeine",
            "summary": "A common stimulant.",
            "featured": true,
            "url": "https://psychonautwiki.org/wiki/Caffeine",
            "roas": [ { "name": "oral", "dose": { "units": "mg", "common": { "min": 50, "max": 150 } } } ],
            "interactions_flat": [ { "name": "Alcohol", "status": "Low Risk & Synergy" } ],
            "addictionPotential": "moderately addictive",
            "tolerance": { "full": "within several days" },
        },
        doc! { "name": "LSD", "summary": "A classical psychedelic.", "featured": true },
        doc! { "name": "Lsd-like", "featured": false },
        doc! { "name": "Alprazolam", "summary": "A benzodiazepine." },
        doc! { "name": "alprazolam", "summary": "Lower-case duplicate." },
        doc! { "name": "Ketamine", "url": "https://psychonautwiki.org/wiki/Ketamine" },
        doc! { "name": "2C-B" },
        doc! { "name": "Alcohol", "featured": false },
    ]
    .into_iter()
    .map(Bson::Document)
    .collect()
}

pub async fn service_with(documents: Vec<Bson>) -> SubstanceService {
    let backend = InMemoryStore::builder()
        .seed(DEFAULT_COLLECTION, documents)
        .build()
        .await
        .unwrap();

    SubstanceService::new(DocumentStore::new(backend), DEFAULT_COLLECTION)
}

pub async fn sample_service() -> SubstanceService {
    service_with(sample_substances()).await
}

/// Backend whose every call fails, standing in for an unreachable database.
#[derive(Debug)]
pub struct FailingBackend;

#[async_trait]
impl StoreBackend for FailingBackend {
    async fn query_documents(&self, _query: Query, _collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        Err(DocumentStoreError::Backend("connection refused".into()))
    }

    async fn find_one(&self, _filter: Expr, _collection: &str) -> DocumentStoreResult<Option<Bson>> {
        Err(DocumentStoreError::Backend("connection refused".into()))
    }
}

pub fn failing_service() -> SubstanceService {
    SubstanceService::new(DocumentStore::new(FailingBackend), DEFAULT_COLLECTION)
}

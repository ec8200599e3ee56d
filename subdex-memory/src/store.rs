//! In-memory storage implementation for document stores.
//!
//! Documents are kept as BSON values in insertion-ordered vectors per collection,
//! guarded by an async-safe read-write lock.

use std::{collections::HashMap, sync::Arc};
use async_trait::async_trait;
use mea::rwlock::RwLock;
use bson::{Bson, Document, oid::ObjectId};

use subdex_core::{
    query::{Expr, Query, SortDirection},
    error::{DocumentStoreError, DocumentStoreResult},
    backend::{StoreBackend, StoreBackendBuilder},
};

use crate::evaluator::{DocumentEvaluator, Comparable};

type StoreMap = HashMap<String, Vec<Bson>>;


/// Thread-safe in-memory document storage backend.
///
/// Implements the read-only [`StoreBackend`] trait; documents are loaded through the
/// inherent [`InMemoryStore::insert_documents`] method or the builder's seeds.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Performance
///
/// Queries scan every document in a collection (no indexing), which is fine for a
/// reference dataset of a few thousand substances.
///
/// # Example
///
/// ```ignore
/// use subdex_memory::InMemoryStore;
/// use subdex_core::{backend::StoreBackend, query::Filter};
/// use bson::{Bson, doc};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///     store
///         .insert_documents("substances", vec![Bson::Document(doc! { "name": "Caffeine" })])
///         .await?;
///
///     let found = store.find_one(Filter::eq("name", "Caffeine"), "substances").await?;
///     assert!(found.is_some());
///
///     Ok(())
/// }
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore` with seed documents.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Appends documents to a collection, creating it if needed.
    ///
    /// Documents without an `_id` are assigned a fresh [`ObjectId`], as MongoDB does on insert.
    ///
    /// # Errors
    ///
    /// Fails with [`DocumentStoreError::InvalidDocument`] if a value is not a document and
    /// with [`DocumentStoreError::DocumentAlreadyExists`] if an `_id` is already present.
    /// Nothing is inserted when any document is rejected.
    pub async fn insert_documents(&self, collection: &str, documents: Vec<Bson>) -> DocumentStoreResult<()> {
        let mut store = self.store.write().await;
        let existing = store
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut prepared: Vec<Bson> = Vec::with_capacity(documents.len());

        for doc in documents {
            let mut doc = match doc {
                Bson::Document(doc) => doc,
                other => {
                    return Err(DocumentStoreError::InvalidDocument(format!(
                        "expected a document, found {:?}",
                        other.element_type()
                    )));
                }
            };

            if !doc.contains_key("_id") {
                doc.insert("_id", ObjectId::new());
            }

            let id = doc.get("_id").cloned().unwrap_or(Bson::Null);
            let duplicate = existing
                .iter()
                .chain(prepared.iter())
                .any(|other| {
                    other
                        .as_document()
                        .and_then(|other| other.get("_id"))
                        .is_some_and(|other_id| Comparable::from(other_id) == Comparable::from(&id))
                });

            if duplicate {
                return Err(DocumentStoreError::DocumentAlreadyExists(
                    display_id(&id),
                    collection.to_string(),
                ));
            }

            prepared.push(Bson::Document(doc));
        }

        store
            .entry(collection.to_string())
            .or_default()
            .extend(prepared);

        Ok(())
    }

    #[cfg(test)]
    async fn count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn display_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keeps only the projected fields of a document, in projection order.
fn project(document: Bson, fields: &[String]) -> Bson {
    match document {
        Bson::Document(doc) => Bson::Document(
            fields
                .iter()
                .filter_map(|field| doc.get(field).map(|value| (field.clone(), value.clone())))
                .collect::<Document>()
        ),
        other => other,
    }
}

fn sort_value<'a>(document: &'a Bson, field: &str) -> Comparable<'a> {
    document
        .as_document()
        .and_then(|doc| doc.get(field))
        .map(Comparable::from)
        .unwrap_or(Comparable::Null)
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        // Apply filter expressions if present
        let mut matched = match &query.filter {
            Some(filter) => DocumentEvaluator::filter_documents(documents, filter)?,
            None => documents.clone(),
        };

        // Stable sort keeps insertion order between equal keys
        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = sort_value(a, &sort.field).total_cmp(&sort_value(b, &sort.field));

                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let limited = matched
            .into_iter()
            .take(query.limit.unwrap_or(usize::MAX));

        Ok(
            match &query.projection {
                Some(fields) => limited.map(|doc| project(doc, fields)).collect(),
                None => limited.collect(),
            }
        )
    }

    async fn find_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<Bson>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(col) => col,
            None => return Ok(None),
        };

        for doc in documents {
            if DocumentEvaluator::new(doc).evaluate(&filter)? {
                return Ok(Some(doc.clone()));
            }
        }

        Ok(None)
    }
}


/// Builder for constructing [`InMemoryStore`] instances pre-loaded with documents.
///
/// # Example
///
/// ```ignore
/// use subdex_memory::InMemoryStore;
/// use subdex_core::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder()
///         .seed("substances", documents)
///         .build()
///         .await
///         .unwrap();
/// }
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder {
    seeds: Vec<(String, Vec<Bson>)>,
}

impl InMemoryStoreBuilder {
    /// Queues documents to be inserted into `collection` when the store is built.
    pub fn seed(mut self, collection: impl Into<String>, documents: Vec<Bson>) -> Self {
        self.seeds.push((collection.into(), documents));
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a new [`InMemoryStore`] and inserts every queued seed.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let store = InMemoryStore::new();

        for (collection, documents) in self.seeds {
            store.insert_documents(&collection, documents).await?;
        }

        Ok(store)
    }
}

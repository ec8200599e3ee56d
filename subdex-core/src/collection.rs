//! Collection handles for document store reads.
//!
//! A [`Collection`] binds a collection name to a backend reference and exposes the two
//! reads the lookup service needs: a filtered find and a single-document lookup. Results
//! are returned as raw BSON records.
//!
//! # Example
//!
//! ```ignore
//! use subdex_core::query::{Filter, Query, SortDirection};
//!
//! # async fn example(store: &subdex_core::store::DocumentStore) -> subdex_core::error::DocumentStoreResult<()> {
//! let substances = store.collection("substances");
//! let found = substances
//!     .find(Query::builder().sort("name", SortDirection::Asc).limit(10).build())
//!     .await?;
//! # Ok(()) }
//! ```

use bson::Bson;

use crate::{
    backend::StoreBackend,
    error::DocumentStoreResult,
    query::{Expr, Query},
};

/// A named collection with a reference to a storage backend.
#[derive(Debug)]
pub struct Collection<'a> {
    name: String,
    backend: &'a dyn StoreBackend,
}

impl<'a> Collection<'a> {
    /// Creates a new collection reference (internal use).
    pub(crate) fn new(name: String, backend: &'a dyn StoreBackend) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queries documents in the collection using a structured query.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the backend fails.
    pub async fn find(&self, query: Query) -> DocumentStoreResult<Vec<Bson>> {
        self.backend
            .query_documents(query, self.name())
            .await
    }

    /// Returns the first document matching `filter`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the backend fails.
    pub async fn find_one(&self, filter: Expr) -> DocumentStoreResult<Option<Bson>> {
        self.backend
            .find_one(filter, self.name())
            .await
    }
}

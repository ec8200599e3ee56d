//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over different storage implementations,
//! allowing the lookup service to run against MongoDB in production and an in-memory
//! store in development and tests.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a read-only async interface: filtered finds with
//! projection, sort and limit, and single-document lookups. Implementations are required
//! to be thread-safe (`Send + Sync`) and the trait is object safe so a backend chosen at
//! runtime can be shared as `Arc<dyn StoreBackend>`.
//!
//! # Example
//!
//! ```ignore
//! use subdex_core::{backend::StoreBackend, query::{Filter, Query}};
//!
//! let backend = MyBackendImpl::new();
//!
//! let docs = backend
//!     .query_documents(Query::builder().filter(Filter::eq("name", "LSD")).build(), "substances")
//!     .await?;
//! ```

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::{
    error::DocumentStoreResult,
    query::{Expr, Query},
};

/// Abstract interface for read-only document storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// request handlers at once.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns the documents of `collection` matching the query, honoring its
    /// projection, sort and limit.
    ///
    /// A collection that does not exist yields an empty result.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Bson>>;

    /// Returns the first document of `collection` matching `filter`, if any.
    async fn find_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<Bson>>;

    /// Releases connections held by the backend.
    async fn shutdown(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Factory trait for creating backend instances asynchronously.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}

//! Document store interface.
//!
//! [`DocumentStore`] owns one backend for the lifetime of the process and hands out
//! [`Collection`] handles by name. It is cheap to clone; every clone shares the same
//! backend, so it can be placed directly into request handler state.

use std::{fmt, sync::Arc};

use crate::{
    backend::StoreBackend,
    collection::Collection,
    error::DocumentStoreResult,
};

/// A shared handle to a document store backend.
///
/// # Example
///
/// ```ignore
/// use subdex_core::store::DocumentStore;
/// use subdex_memory::InMemoryStore;
///
/// let store = DocumentStore::new(InMemoryStore::new());
/// let substances = store.collection("substances");
/// ```
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn StoreBackend>,
}

impl DocumentStore {
    /// Creates a new document store with the given backend.
    pub fn new(backend: impl StoreBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Creates a document store from an already shared backend.
    pub fn from_arc(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Gets a handle to the named collection.
    pub fn collection(&self, name: &str) -> Collection<'_> {
        Collection::new(name.to_string(), self.backend.as_ref())
    }

    /// Shuts down the backend, releasing its connections.
    ///
    /// Call once, after the last request has been served.
    pub async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await
    }
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("backend", &self.backend)
            .finish()
    }
}

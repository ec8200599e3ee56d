//! Store and collection plumbing tests against a recording backend.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use bson::{Bson, doc};

use crate::{
    backend::StoreBackend,
    error::DocumentStoreResult,
    query::{Expr, Filter, Query, SortDirection},
    store::DocumentStore,
};

#[derive(Debug, Default)]
struct RecordingBackend {
    queries: Mutex<Vec<(String, Query)>>,
    lookups: Mutex<Vec<(String, Expr)>>,
    shut_down: AtomicBool,
}

#[async_trait]
impl StoreBackend for RecordingBackend {
    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Bson>> {
        self.queries.lock().unwrap().push((collection.to_string(), query));
        Ok(vec![Bson::Document(doc! { "name": "Caffeine" })])
    }

    async fn find_one(&self, filter: Expr, collection: &str) -> DocumentStoreResult<Option<Bson>> {
        self.lookups.lock().unwrap().push((collection.to_string(), filter));
        Ok(None)
    }

    async fn shutdown(&self) -> DocumentStoreResult<()> {
        self.shut_down.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn collection_forwards_query_with_its_name() {
    let backend = Arc::new(RecordingBackend::default());
    let store = DocumentStore::from_arc(backend.clone());

    let query = Query::builder()
        .sort("name", SortDirection::Asc)
        .limit(3)
        .build();
    let docs = store.collection("substances").find(query.clone()).await.unwrap();

    assert_eq!(docs.len(), 1);
    let queries = backend.queries.lock().unwrap();
    assert_eq!(queries.as_slice(), &[("substances".to_string(), query)]);
}

#[tokio::test]
async fn find_one_forwards_filter() {
    let backend = Arc::new(RecordingBackend::default());
    let store = DocumentStore::from_arc(backend.clone());

    let found = store
        .collection("substances")
        .find_one(Filter::eq("name", "LSD"))
        .await
        .unwrap();

    assert!(found.is_none());
    let lookups = backend.lookups.lock().unwrap();
    assert_eq!(lookups.as_slice(), &[("substances".to_string(), Filter::eq("name", "LSD"))]);
}

#[tokio::test]
async fn clones_share_one_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let store = DocumentStore::from_arc(backend.clone());
    let other = store.clone();

    store.collection("a").find(Query::new()).await.unwrap();
    other.collection("b").find(Query::new()).await.unwrap();

    assert_eq!(backend.queries.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn shutdown_reaches_backend() {
    let backend = Arc::new(RecordingBackend::default());
    let store = DocumentStore::from_arc(backend.clone());

    store.shutdown().await.unwrap();

    assert!(backend.shut_down.load(Ordering::SeqCst));
}

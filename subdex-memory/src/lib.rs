//! In-memory document storage backend for subdex.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and backs local development
//! (seeded from a JSON file) and the service's tests.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads using an async-aware RwLock
//! - **Type-erased storage** - Stores documents as BSON for flexibility
//! - **Full query support** - Filtering, projection, sorting and limits
//! - **Insertion order** - Unsorted reads and `find_one` follow insertion order
//!
//! # Quick Start
//!
//! ```ignore
//! use subdex_core::{backend::StoreBackendBuilder, store::DocumentStore};
//! use subdex_memory::InMemoryStore;
//! use bson::{Bson, doc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder()
//!         .seed("substances", vec![Bson::Document(doc! { "name": "Caffeine" })])
//!         .build()
//!         .await?;
//!     let store = DocumentStore::new(backend);
//!
//!     Ok(())
//! }
//! ```


pub mod store;
pub mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder};

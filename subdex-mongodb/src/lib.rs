//! MongoDB backend implementation for subdex.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! reading substance records from an existing MongoDB collection.
//!
//! To use this backend, build the service with the `mongodb` feature (on by default):
//!
//! ```toml
//! [dependencies]
//! subdex = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Features
//!
//! - **Native queries** - Filters, projection, sort and limit run inside MongoDB
//! - **Literal matching** - Substring and case-insensitive terms are regex-escaped
//! - **Async/await** - Fully asynchronous API built on MongoDB's async driver
//!
//! # Example
//!
//! ```ignore
//! use subdex_core::backend::StoreBackendBuilder;
//! use subdex_mongodb::MongoDbStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "app_db")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```


pub mod store;
mod query;

pub use store::{MongoDbStore, MongoDbStoreBuilder};

//! A thin read-only document store abstraction used by the subdex lookup service.
//!
//! This crate provides:
//!
//! - **Store backend abstraction** ([`backend`]) - Traits implemented by the MongoDB and in-memory backends
//! - **Query and filtering API** ([`query`]) - Filter expressions, projection, sort and limit
//! - **Collections interface** ([`collection`]) - Named collection handles with find and find-one
//! - **Document store** ([`store`]) - Shared, cloneable handle owning one backend
//! - **Record decoding** ([`document`]) - Decoding raw BSON records into typed values
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use subdex_core::{query::{Filter, Query, SortDirection}, store::DocumentStore};
//!
//! let store = DocumentStore::new(backend);
//! let docs = store
//!     .collection("substances")
//!     .find(
//!         Query::builder()
//!             .filter(Filter::contains_ignore_case("name", "caff"))
//!             .sort("name", SortDirection::Asc)
//!             .limit(20)
//!             .build(),
//!     )
//!     .await?;
//! ```

pub mod backend;
pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod store;

#[cfg(test)]
mod tests;

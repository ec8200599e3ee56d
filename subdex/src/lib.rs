//! Read-only lookup service over a collection of psychoactive substance records.
//!
//! The service answers three HTTP endpoints:
//!
//! - `GET /api/health` - liveness probe
//! - `GET /api/substances?search=&limit=` - case-insensitive name search, ordered by name
//! - `GET /api/substances/{name}` - full record, exact match first, then ignoring case
//!
//! Records live in a document store chosen at startup: MongoDB in production (requires the
//! `mongodb` feature) or an in-memory store seeded from a JSON file.
//!
//! ```ignore
//! use subdex::{api, bootstrap, config::AppConfig, service::SubstanceService};
//!
//! let config = AppConfig::from_env()?;
//! let store = bootstrap::open_store(&config).await?;
//! let app = api::router(api::AppState::new(SubstanceService::new(store, config.collection)));
//! ```

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod filters;
pub mod model;
pub mod service;
pub mod shape;

#[cfg(test)]
mod fixtures;

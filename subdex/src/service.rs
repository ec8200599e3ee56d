//! Search and detail lookups over the substance collection.

use subdex_core::{collection::Collection, store::DocumentStore};

use crate::{
    error::{SubstanceError, SubstanceResult},
    filters::{detail_filters, search_query},
    model::{SubstanceDetail, SubstanceSummary},
    shape::{to_detail, to_summary},
};

/// Read-only lookups against one substance collection.
///
/// Holds the process-wide [`DocumentStore`] handle; clones share it.
#[derive(Debug, Clone)]
pub struct SubstanceService {
    store: DocumentStore,
    collection: String,
}

impl SubstanceService {
    pub fn new(store: DocumentStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn substances(&self) -> Collection<'_> {
        self.store.collection(&self.collection)
    }

    /// Lists summaries whose name contains `term` ignoring case, ordered by name.
    ///
    /// `limit` is clamped to `[1, 200]`; an absent or empty term lists every substance.
    pub async fn search(&self, term: Option<&str>, limit: i64) -> SubstanceResult<Vec<SubstanceSummary>> {
        let query = search_query(term, limit);
        tracing::debug!(?term, limit = ?query.limit, "searching substances");

        let summaries = self
            .substances()
            .find(query)
            .await?
            .into_iter()
            .map(to_summary)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = summaries.len(), "search complete");
        Ok(summaries)
    }

    /// Fetches the full record for `name`.
    ///
    /// An exact match wins; otherwise the first record whose name equals `name` ignoring
    /// case is returned.
    ///
    /// # Errors
    ///
    /// [`SubstanceError::NotFound`] when neither stage matches.
    pub async fn get_detail(&self, name: &str) -> SubstanceResult<SubstanceDetail> {
        let filters = detail_filters(name);
        let substances = self.substances();

        let record = match substances.find_one(filters.exact).await? {
            Some(record) => {
                tracing::debug!(name, stage = "exact", "substance found");
                record
            }
            None => match substances.find_one(filters.fallback).await? {
                Some(record) => {
                    tracing::debug!(name, stage = "case-insensitive", "substance found");
                    record
                }
                None => {
                    tracing::debug!(name, "substance not found");
                    return Err(SubstanceError::NotFound(name.to_string()));
                }
            },
        };

        Ok(to_detail(record)?)
    }
}

// src/integrations/catalog.rs
//
// Catalog transport port.
//
// Three logical operations against the external rating catalog. Each is
// one network request; the resolution pipeline decides how to chain
// them. Implementations report transport-level failures as errors; the
// pipeline collapses every failure into "no match".

use async_trait::async_trait;

use crate::domain::{Candidate, CatalogRecord, TitleKind};
use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Fetch a single record by title, optionally constrained by year
    /// and kind. A catalog miss is Ok(None).
    async fn fetch_by_title(
        &self,
        title: &str,
        year: Option<String>,
        kind: Option<TitleKind>,
    ) -> AppResult<Option<CatalogRecord>>;

    /// Free-text search. Year is never a search filter; the scorer
    /// applies it afterwards. A catalog miss is an empty list.
    async fn search_by_title(
        &self,
        title: &str,
        kind: Option<TitleKind>,
    ) -> AppResult<Vec<Candidate>>;

    /// Fetch the full record for a previously searched candidate.
    async fn fetch_by_id(&self, external_id: &str) -> AppResult<Option<CatalogRecord>>;
}

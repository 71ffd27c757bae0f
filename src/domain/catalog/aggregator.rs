//! The two-call search pipeline: text search, then one detail lookup.

use crate::domain::catalog::normalize::{normalize_item, sort_by_rank};
use crate::domain::catalog::{CatalogError, CatalogTransport, GameResult};
use crate::infra::bgg::schema::{decode_search, decode_things};
use std::collections::HashSet;
use std::sync::Arc;

/// Upper bound on search hits forwarded to the detail lookup.
pub const MAX_CANDIDATES: usize = 15;

/// Search service over an injected catalog transport.
///
/// Holds no per-request state, so one instance serves any number of
/// concurrent searches.
#[derive(Clone)]
pub struct CatalogSearch {
    transport: Arc<dyn CatalogTransport>,
}

impl CatalogSearch {
    pub fn new(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// Runs a search and returns normalized results, best ranked first.
    ///
    /// An empty query is rejected before the provider is contacted. Any
    /// transport or decoding failure on either call fails the whole search.
    pub async fn search(&self, query: &str) -> Result<Vec<GameResult>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let search_xml = self.transport.search(query).await?;
        let search = decode_search(&search_xml)?;
        if search.is_empty() {
            log::debug!("Catalog search for '{}' matched nothing", query);
            return Ok(Vec::new());
        }

        let ids = candidate_ids(search.hits().iter().map(|h| h.id.as_str()));
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        log::debug!(
            "Catalog search for '{}' produced {} candidate(s): {}",
            query,
            ids.len(),
            ids.join(",")
        );

        let things_xml = self.transport.thing(&ids).await?;
        let things = decode_things(&things_xml)?;

        let mut results: Vec<GameResult> = things.items.iter().filter_map(normalize_item).collect();
        sort_by_rank(&mut results);

        log::info!("Catalog search for '{}' returned {} result(s)", query, results.len());
        Ok(results)
    }
}

/// Caps hits to the first `MAX_CANDIDATES` in provider order, then drops
/// repeated ids (first occurrence wins).
pub fn candidate_ids<'a>(hits: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.take(MAX_CANDIDATES)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

use anyhow::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::api::{ModelCatalog, ModelHit};
use crate::interactive::constants::SEARCH_CACHE_SIZE;
use crate::interactive::domain::models::{SearchRequest, SearchResponse};

/// Remote search behind a keyed memoizing cache. All requests for one
/// session are served by a single worker thread, so a given query string
/// can never have two fetches in flight; a repeat is answered from the
/// cache instead.
pub struct SearchService {
    catalog: Arc<dyn ModelCatalog>,
    limit: u32,
    cache: Mutex<LruCache<String, Vec<ModelHit>>>,
}

impl SearchService {
    pub fn new(catalog: Arc<dyn ModelCatalog>, limit: u32) -> Self {
        Self {
            catalog,
            limit,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(SEARCH_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    pub fn search(&self, request: SearchRequest) -> SearchResponse {
        let result = self
            .cached_search(&request.query)
            .map_err(|e| format!("{e:#}"));
        SearchResponse {
            id: request.id,
            query: request.query,
            result,
        }
    }

    fn cached_search(&self, query: &str) -> Result<Vec<ModelHit>> {
        if let Some(hits) = self.cache.lock().unwrap().get(query) {
            debug!(query, results = hits.len(), "search cache hit");
            return Ok(hits.clone());
        }
        let hits = self.catalog.search(query, self.limit)?;
        debug!(query, results = hits.len(), "search fetched");
        // Only settled successes are memoized; a failed query stays retryable.
        self.cache
            .lock()
            .unwrap()
            .put(query.to_string(), hits.clone());
        Ok(hits)
    }
}

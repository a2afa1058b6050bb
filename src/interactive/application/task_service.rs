use anyhow::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::api::{ModelCatalog, ModelDetail};
use crate::interactive::constants::TASK_CACHE_SIZE;
use crate::interactive::domain::models::{TaskFetchRequest, TaskFetchResponse};

/// Task detail lookups, memoized by task id. A generation that resolved
/// once is immutable on the server side, so reopening the same modal is
/// free after the first fetch.
pub struct TaskService {
    catalog: Arc<dyn ModelCatalog>,
    cache: Mutex<LruCache<String, ModelDetail>>,
}

impl TaskService {
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self {
            catalog,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(TASK_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            )),
        }
    }

    pub fn resolve(&self, request: TaskFetchRequest) -> TaskFetchResponse {
        let result = self
            .cached_resolve(&request.task_id)
            .map_err(|e| format!("{e:#}"));
        TaskFetchResponse {
            id: request.id,
            task_id: request.task_id,
            result,
        }
    }

    fn cached_resolve(&self, task_id: &str) -> Result<ModelDetail> {
        if let Some(detail) = self.cache.lock().unwrap().get(task_id) {
            debug!(task_id, "task cache hit");
            return Ok(detail.clone());
        }
        let detail = self.catalog.task(task_id)?;
        debug!(task_id, "task fetched");
        self.cache
            .lock()
            .unwrap()
            .put(task_id.to_string(), detail.clone());
        Ok(detail)
    }
}

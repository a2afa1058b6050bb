use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::api::ModelCatalog;
use crate::download::file_name_from_url;
use crate::interactive::domain::models::{DownloadOutcome, DownloadRequest, DownloadResponse};

/// Saves a GLB asset into the chosen directory, deriving the file name
/// from the asset URL.
pub struct DownloadService {
    catalog: Arc<dyn ModelCatalog>,
}

impl DownloadService {
    pub fn new(catalog: Arc<dyn ModelCatalog>) -> Self {
        Self { catalog }
    }

    pub fn download(&self, request: DownloadRequest) -> DownloadResponse {
        let result = self
            .save_to_dir(&request.url, &request.dest_dir)
            .map_err(|e| format!("{e:#}"));
        DownloadResponse {
            id: request.id,
            result,
        }
    }

    fn save_to_dir(&self, url: &str, dest_dir: &Path) -> Result<DownloadOutcome> {
        fs::create_dir_all(dest_dir)
            .with_context(|| format!("failed to create {}", dest_dir.display()))?;
        let path = dest_dir.join(file_name_from_url(url));
        let bytes = self.catalog.download(url, &path)?;
        info!(path = %path.display(), bytes, "asset saved");
        Ok(DownloadOutcome { path, bytes })
    }
}

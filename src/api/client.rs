use anyhow::{Context, Result, bail};
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::types::{ModelDetail, ModelHit, SearchEnvelope, TaskEnvelope};

/// Connection settings for the generation service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
}

/// Narrow seam over the generation service. Search and task lookups hit the
/// authenticated endpoints; `download` streams an already-resolved asset URL
/// to disk. Implementations must be callable from worker threads.
pub trait ModelCatalog: Send + Sync {
    fn search(&self, prompt: &str, limit: u32) -> Result<Vec<ModelHit>>;
    fn task(&self, task_id: &str) -> Result<ModelDetail>;
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("glbfind/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }

    fn task_url(&self, task_id: &str) -> String {
        format!(
            "{}/task/{}",
            self.config.base_url.trim_end_matches('/'),
            task_id
        )
    }
}

impl ModelCatalog for ApiClient {
    fn search(&self, prompt: &str, limit: u32) -> Result<Vec<ModelHit>> {
        debug!(prompt = %prompt, limit, "searching catalog");

        let response = self
            .http
            .get(self.search_url())
            .query(&[
                ("prompt", prompt),
                ("type", "text_to_model"),
                ("limit", &limit.to_string()),
            ])
            .bearer_auth(&self.config.token)
            .send()
            .context("search request failed")?;

        if !response.status().is_success() {
            bail!("search request failed: HTTP {}", response.status());
        }

        let envelope: SearchEnvelope = response
            .json()
            .context("malformed search response")?;
        debug!(
            code = envelope.code,
            hits = envelope.payload.len(),
            "search completed"
        );
        Ok(envelope.payload)
    }

    fn task(&self, task_id: &str) -> Result<ModelDetail> {
        debug!(task_id = %task_id, "resolving task");

        let response = self
            .http
            .get(self.task_url(task_id))
            .bearer_auth(&self.config.token)
            .send()
            .context("task request failed")?;

        if !response.status().is_success() {
            bail!("task request failed: HTTP {}", response.status());
        }

        let envelope: TaskEnvelope = response.json().context("malformed task response")?;
        Ok(envelope.data)
    }

    // Asset URLs are presigned storage links; no auth header.
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        debug!(url = %url, dest = %dest.display(), "downloading asset");

        let response = self
            .http
            .get(url)
            .send()
            .with_context(|| format!("download request failed: {url}"))?;

        if !response.status().is_success() {
            bail!("download failed: HTTP {}", response.status());
        }

        let mut file = std::fs::File::create(dest)
            .with_context(|| format!("failed to create {}", dest.display()))?;

        let mut reader = response;
        let mut buffer = [0u8; 8192];
        let mut written = 0u64;
        loop {
            let n = reader
                .read(&mut buffer)
                .context("failed reading download stream")?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n])
                .with_context(|| format!("failed writing {}", dest.display()))?;
            written += n as u64;
        }

        debug!(bytes = written, "download complete");
        Ok(written)
    }
}

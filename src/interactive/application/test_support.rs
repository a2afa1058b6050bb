//! Scriptable catalog double shared by the service tests.

use anyhow::{Result, anyhow};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::api::{ModelCatalog, ModelDetail, ModelHit};

pub const SAMPLE_TASK_ID: &str = "c504afa1-9629-45ee-a80c-7c128b80ce92";

pub fn sample_hit(id: i64, prompt: &str) -> ModelHit {
    ModelHit {
        id,
        task_id: SAMPLE_TASK_ID.to_string(),
        thumbnail_url: format!("https://cdn.example.com/thumbs/{id}.webp"),
        prompt: Some(prompt.to_string()),
        create_time: Some(1_700_000_000),
    }
}

pub fn sample_detail(model_url: &str) -> ModelDetail {
    ModelDetail {
        model: model_url.to_string(),
        prompt: Some("a weathered bronze astrolabe".to_string()),
        status: Some("success".to_string()),
        create_time: Some(1_700_000_000),
    }
}

/// Records every call and replays scripted outcomes in order. When the
/// script runs dry it falls back to a canned success so tests only queue
/// the interesting cases.
pub struct MockCatalog {
    search_calls: Mutex<Vec<String>>,
    task_calls: Mutex<Vec<String>>,
    download_calls: Mutex<Vec<String>>,
    scripted_searches: Mutex<VecDeque<Result<Vec<ModelHit>, String>>>,
    scripted_tasks: Mutex<VecDeque<Result<ModelDetail, String>>>,
    scripted_downloads: Mutex<VecDeque<Result<Vec<u8>, String>>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            search_calls: Mutex::new(Vec::new()),
            task_calls: Mutex::new(Vec::new()),
            download_calls: Mutex::new(Vec::new()),
            scripted_searches: Mutex::new(VecDeque::new()),
            scripted_tasks: Mutex::new(VecDeque::new()),
            scripted_downloads: Mutex::new(VecDeque::new()),
        }
    }

    pub fn script_search(&self, outcome: Result<Vec<ModelHit>, String>) {
        self.scripted_searches.lock().unwrap().push_back(outcome);
    }

    pub fn script_task(&self, outcome: Result<ModelDetail, String>) {
        self.scripted_tasks.lock().unwrap().push_back(outcome);
    }

    pub fn script_download(&self, outcome: Result<Vec<u8>, String>) {
        self.scripted_downloads.lock().unwrap().push_back(outcome);
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn task_calls(&self) -> Vec<String> {
        self.task_calls.lock().unwrap().clone()
    }

    pub fn download_calls(&self) -> Vec<String> {
        self.download_calls.lock().unwrap().clone()
    }
}

impl ModelCatalog for MockCatalog {
    fn search(&self, prompt: &str, _limit: u32) -> Result<Vec<ModelHit>> {
        self.search_calls.lock().unwrap().push(prompt.to_string());
        match self.scripted_searches.lock().unwrap().pop_front() {
            Some(Ok(hits)) => Ok(hits),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(vec![sample_hit(1, prompt)]),
        }
    }

    fn task(&self, task_id: &str) -> Result<ModelDetail> {
        self.task_calls.lock().unwrap().push(task_id.to_string());
        match self.scripted_tasks.lock().unwrap().pop_front() {
            Some(Ok(detail)) => Ok(detail),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(sample_detail("https://cdn.example.com/assets/out.glb")),
        }
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.download_calls.lock().unwrap().push(url.to_string());
        match self.scripted_downloads.lock().unwrap().pop_front() {
            Some(Ok(bytes)) => {
                fs::write(dest, &bytes)?;
                Ok(bytes.len() as u64)
            }
            Some(Err(message)) => Err(anyhow!(message)),
            None => {
                fs::write(dest, b"glTF-binary")?;
                Ok(11)
            }
        }
    }
}

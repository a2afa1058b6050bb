use std::path::PathBuf;

use crate::api::types::{ModelDetail, ModelHit};
use crate::viewer::ModelView;

/// Top-level screens. The model modal is not a mode: it overlays the grid
/// whenever the share link carries a task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Search,
    Help,
}

/// Where the model modal stands, derived from the task id parameter and
/// the settlement of its fetch. Invariant: any open phase names the same
/// task id the share link currently carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalPhase {
    Closed,
    /// Task id present but malformed. Never fetches.
    Invalid { task_id: String },
    Loading { task_id: String },
    Error { task_id: String, error: String },
    Ready { task_id: String, detail: ModelDetail },
}

impl ModalPhase {
    pub fn task_id(&self) -> Option<&str> {
        match self {
            ModalPhase::Closed => None,
            ModalPhase::Invalid { task_id }
            | ModalPhase::Loading { task_id }
            | ModalPhase::Error { task_id, .. }
            | ModalPhase::Ready { task_id, .. } => Some(task_id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalPhase::Closed)
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub id: u64,
    pub query: String,
}

#[derive(Debug)]
pub struct SearchResponse {
    pub id: u64,
    pub query: String,
    pub result: Result<Vec<ModelHit>, String>,
}

#[derive(Debug, Clone)]
pub struct TaskFetchRequest {
    pub id: u64,
    pub task_id: String,
}

#[derive(Debug)]
pub struct TaskFetchResponse {
    pub id: u64,
    pub task_id: String,
    pub result: Result<ModelDetail, String>,
}

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub id: u64,
    pub url: String,
    pub dest_dir: PathBuf,
}

#[derive(Debug)]
pub struct DownloadResponse {
    pub id: u64,
    pub result: Result<DownloadOutcome, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOutcome {
    pub path: PathBuf,
    pub bytes: u64,
}

pub struct ViewerActivationRequest {
    pub asset_url: String,
}

pub struct ViewerActivationResponse {
    pub asset_url: String,
    pub result: Result<Box<dyn ModelView>, String>,
}

/// Curated generations shown while the search box is empty. Selecting one
/// opens its modal like any fetched hit; no network call is involved in
/// listing them.
pub fn example_hits() -> Vec<ModelHit> {
    const EXAMPLES: &[(i64, &str, &str)] = &[
        (1, "9f2c41aa-83c1-4e6b-9d2a-5f0e8b21c703", "a chrome dragon perched on a rock"),
        (2, "4b7d90ce-12f4-4c5e-8a3b-6d9e0f174a52", "low poly camping tent"),
        (3, "d31a68fb-57a2-4b19-b4c8-92e5d7f0a816", "ceramic teapot with floral pattern"),
        (4, "7e94c2d0-a8b5-4f36-91d7-3c2b8e6f5a04", "sci-fi hover bike"),
        (5, "2a58f7e3-c90d-4a61-b5e2-784f1d0c9b37", "wooden rocking chair"),
        (6, "c6031b9d-4e72-48fa-a1c5-0d8b92e7f641", "cartoon axolotl plush"),
        (7, "58e2d4af-90c3-4b87-bd61-7a5f30c1e928", "ancient stone golem"),
        (8, "b1f7a30c-65d9-4c20-8e4b-d92c57a08f13", "retro arcade cabinet"),
    ];

    EXAMPLES
        .iter()
        .map(|&(id, task_id, prompt)| ModelHit {
            id,
            task_id: task_id.to_string(),
            thumbnail_url: format!(
                "https://trivo.app/examples/{}.webp",
                prompt.replace(' ', "-")
            ),
            prompt: Some(prompt.to_string()),
            create_time: None,
        })
        .collect()
}

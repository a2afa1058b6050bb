use crate::api::{ModelDetail, ModelHit};
use crate::interactive::domain::models::DownloadOutcome;

/// What gets copied to the system clipboard.
#[derive(Debug, Clone, PartialEq)]
pub enum CopyContent {
    ShareLink(String),
    AssetUrl(String),
    TaskId(String),
}

/// Messages flow from components and workers into `AppState::update`.
#[derive(Debug, Clone)]
pub enum Message {
    // Search events
    QueryChanged(String),
    ClearQuery,
    CommitQuery,
    SearchCompleted {
        id: u64,
        query: String,
        result: Result<Vec<ModelHit>, String>,
    },

    // Grid events
    SelectCell(usize),
    OpenModel(String),

    // Modal events
    CloseModel,
    ModelFetchCompleted {
        id: u64,
        task_id: String,
        result: Result<ModelDetail, String>,
    },
    RetryModelFetch,
    DownloadRequested,
    DownloadCompleted {
        id: u64,
        result: Result<DownloadOutcome, String>,
    },

    // Mode changes
    ShowHelp,
    CloseHelp,

    // Clipboard and status line
    CopyToClipboard(CopyContent),
    SetStatus(String),
    ClearStatus,
}

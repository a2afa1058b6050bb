pub mod api;
pub mod download;
pub mod interactive;
pub mod logging;
pub mod share_link;
pub mod task_id;
pub mod viewer;

pub use api::{
    ApiClient, ApiConfig, DEFAULT_API_BASE, DEFAULT_RESULT_LIMIT, ModelCatalog, ModelDetail,
    ModelHit,
};
pub use download::{default_download_dir, file_name_from_url};
pub use interactive::InteractiveApp;
pub use share_link::{DEFAULT_BASE, PARAM_QUERY, PARAM_TASK_ID, ShareLink};
pub use task_id::{is_valid_task_id, short_task_id};
pub use viewer::{ExternalViewer, LazyViewer, ModelView, ViewerBackend};

pub mod client;
pub mod types;

pub use client::{ApiClient, ApiConfig, ModelCatalog};
pub use types::{ModelDetail, ModelHit, SearchEnvelope, TaskEnvelope};

/// Base URL of the generation service.
pub const DEFAULT_API_BASE: &str = "https://api.tripo3d.ai/v2/web";

/// Result page size requested from the search endpoint.
pub const DEFAULT_RESULT_LIMIT: u32 = 24;

use std::sync::Arc;

use crate::llm_client::GptClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion client. Shared behind `Arc` so the cached IAM credential
    /// survives across requests; refreshes are serialized inside the client.
    pub llm: Arc<GptClient>,
}

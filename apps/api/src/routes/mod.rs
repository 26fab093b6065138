pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers::handle_export_resume;
use crate::generation::handlers::handle_generate_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/generate-resume", post(handle_generate_resume))
        .route("/api/export-resume", post(handle_export_resume))
        .with_state(state)
}

//! Axum route handlers for the resume API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::generate_resume;
use crate::models::profile::UserProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub user_data: UserProfile,
    #[serde(default = "default_style")]
    pub resume_type: String,
}

fn default_style() -> String {
    "standard".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    /// Markdown résumé text as returned by the model.
    pub resume: String,
    pub style: String,
}

/// POST /api/generate-resume
///
/// Builds the prompt from the submitted profile and the chosen style and runs
/// one completion round trip. `name` is the only required profile field.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    if request.user_data.name.trim().is_empty() {
        return Err(AppError::Validation(
            "user_data.name cannot be empty".to_string(),
        ));
    }

    info!("Generating resume (style: {})", request.resume_type);
    let resume = generate_resume(&state.llm, &request.user_data, &request.resume_type).await?;

    Ok(Json(GenerateResumeResponse {
        resume,
        style: request.resume_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults_style_to_standard() {
        let json = serde_json::json!({
            "user_data": { "name": "Иван Иванов" }
        });
        let request: GenerateResumeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.resume_type, "standard");
        assert_eq!(request.user_data.name, "Иван Иванов");
    }

    #[test]
    fn test_generate_request_accepts_explicit_style() {
        let json = serde_json::json!({
            "user_data": { "name": "Иван Иванов" },
            "resume_type": "it"
        });
        let request: GenerateResumeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.resume_type, "it");
    }
}

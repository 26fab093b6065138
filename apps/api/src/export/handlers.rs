//! Axum route handler for résumé downloads.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::{export_markdown, ExportFormat};

#[derive(Debug, Deserialize)]
pub struct ExportResumeRequest {
    /// Markdown résumé text, normally the output of the generate endpoint.
    pub resume: String,
    pub format: ExportFormat,
}

/// POST /api/export-resume
///
/// Converts the submitted Markdown into the requested format and streams it
/// back as an attachment.
pub async fn handle_export_resume(
    Json(request): Json<ExportResumeRequest>,
) -> Result<Response, AppError> {
    if request.resume.trim().is_empty() {
        return Err(AppError::Validation("resume cannot be empty".to_string()));
    }

    info!("Exporting resume as {}", request.format.extension());
    let document = export_markdown(&request.resume, request.format).await?;

    let headers = [
        (header::CONTENT_TYPE, document.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.filename),
        ),
    ];

    Ok((headers, Bytes::from(document.bytes)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_request_deserialization() {
        let json = serde_json::json!({
            "resume": "# Резюме",
            "format": "pdf"
        });
        let request: ExportResumeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.format, ExportFormat::Pdf);
        assert_eq!(request.resume, "# Резюме");
    }
}

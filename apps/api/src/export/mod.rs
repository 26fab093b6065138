//! Markdown → PDF/DOCX conversion via the pandoc CLI.
//!
//! The converter is a black box with a narrow contract: Markdown text in,
//! document bytes out. The résumé is written to a temporary directory, pandoc
//! renders it there, and the result is read back; nothing persists.

use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub mod handlers;

/// Output formats the export endpoint can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A converted document ready to stream back to the client.
#[derive(Debug)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("failed to write markdown source: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("failed to run pandoc: {0}")]
    ConverterIo(#[source] std::io::Error),

    #[error("pandoc exited with status {status}: {stderr}")]
    ConverterExit { status: i32, stderr: String },

    #[error("failed to read converted document: {0}")]
    ReadOutput(#[source] std::io::Error),
}

/// Converts Markdown résumé text into the requested document format.
pub async fn export_markdown(
    markdown: &str,
    format: ExportFormat,
) -> Result<ExportedDocument, ExportError> {
    let dir = tempfile::tempdir().map_err(ExportError::TempDir)?;
    let source_path = dir.path().join("resume.md");
    let output_name = format!("resume.{}", format.extension());
    let output_path = dir.path().join(&output_name);

    tokio::fs::write(&source_path, markdown)
        .await
        .map_err(ExportError::WriteSource)?;

    let output = Command::new("pandoc")
        .arg(&source_path)
        .arg("-o")
        .arg(&output_path)
        .output()
        .await
        .map_err(ExportError::ConverterIo)?;

    if !output.status.success() {
        return Err(ExportError::ConverterExit {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let bytes = tokio::fs::read(&output_path)
        .await
        .map_err(ExportError::ReadOutput)?;
    debug!("Exported {} bytes as {}", bytes.len(), format.extension());

    Ok(ExportedDocument {
        filename: output_name,
        content_type: format.content_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ExportFormat::Docx.extension(), "docx");
        assert!(ExportFormat::Docx.content_type().contains("wordprocessingml"));
    }

    #[test]
    fn test_format_deserializes_from_lowercase_tags() {
        let pdf: ExportFormat = serde_json::from_value(serde_json::json!("pdf")).unwrap();
        let docx: ExportFormat = serde_json::from_value(serde_json::json!("docx")).unwrap();
        assert_eq!(pdf, ExportFormat::Pdf);
        assert_eq!(docx, ExportFormat::Docx);

        let unknown: Result<ExportFormat, _> =
            serde_json::from_value(serde_json::json!("odt"));
        assert!(unknown.is_err());
    }

    #[tokio::test]
    async fn test_docx_export_produces_nonempty_document() {
        if Command::new("pandoc").arg("--version").output().await.is_err() {
            eprintln!("pandoc not installed; skipping conversion test");
            return;
        }

        let document = export_markdown("# Резюме\n\n- Python\n- Go", ExportFormat::Docx)
            .await
            .unwrap();
        assert_eq!(document.filename, "resume.docx");
        assert!(!document.bytes.is_empty());
        // DOCX is a zip container.
        assert_eq!(&document.bytes[..2], b"PK");
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every failure of the extraction pipeline ends up as one of these variants.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No resume file provided")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File must be a PDF")]
    UnsupportedType,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Uploaded file exceeds the maximum allowed size of {limit} bytes")]
    UploadTooLarge { limit: usize },

    #[error("Invalid PDF file. Could not read.")]
    UnreadablePdf(String),

    #[error("Could not extract text from PDF. It might be an image-based PDF or empty.")]
    NoExtractableText,

    #[error("Failed to parse skills from AI response. Raw response: {raw}")]
    AiResponseUnparseable { raw: String },

    #[error("An unexpected error occurred during AI processing: {0}")]
    AiResponseMalformed(String),

    #[error("An unexpected error occurred during AI processing: {0}")]
    AiProcessing(String),

    #[error("An unexpected server error occurred: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::EmptyFilename
            | AppError::UnsupportedType
            | AppError::InvalidUpload(_)
            | AppError::UnreadablePdf(_)
            | AppError::NoExtractableText => StatusCode::BAD_REQUEST,
            AppError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::AiResponseUnparseable { .. }
            | AppError::AiResponseMalformed(_)
            | AppError::AiProcessing(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::UnreadablePdf(cause) => tracing::debug!("PDF parser error: {cause}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            e if status.is_server_error() => tracing::error!("AI processing error: {e}"),
            _ => {}
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

/// Turns a panic caught by `CatchPanicLayer` into the same JSON 500 every
/// other unclassified failure gets.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

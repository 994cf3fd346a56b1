//! Request validation — pulls the `resume` file part out of a multipart body.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;

use crate::errors::AppError;

/// Multipart field carrying the resume.
pub const RESUME_FIELD: &str = "resume";

/// A file received in the request. Lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: Bytes,
}

/// Checks the client-supplied filename. Content is never inspected here.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.is_empty() {
        return Err(AppError::EmptyFilename);
    }
    if !filename.ends_with(".pdf") {
        return Err(AppError::UnsupportedType);
    }
    Ok(())
}

/// Reads the first `resume` part that carries a filename.
///
/// A `resume` part without a filename is a plain form field, not a file, and is
/// skipped. Other fields are ignored. The filename is validated before the
/// body of the part is read.
pub async fn read_resume(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_bytes))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        validate_filename(&filename)?;

        let content = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_upload_bytes))?;

        return Ok(UploadedDocument { filename, content });
    }

    Err(AppError::MissingFile)
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge { limit }
    } else {
        AppError::InvalidUpload(err.body_text())
    }
}

//! Text Extractor — turns PDF bytes into plain text.
//!
//! Pages are read one by one with `lopdf`; a page that fails contributes an
//! empty string instead of failing the document. When that pass finds nothing,
//! `pdf-extract` gets a second try over the whole document since it handles
//! more font encodings.

use bytes::Bytes;
use lopdf::Document;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts text on the blocking pool and rejects documents with no text.
pub async fn extract_text(content: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_document_text(&content))
        .await
        .map_err(|e| AppError::UnreadablePdf(format!("PDF parser aborted: {e}")))??;

    if text.trim().is_empty() {
        return Err(AppError::NoExtractableText);
    }

    Ok(text)
}

/// Concatenated text of every page, in page order. May be empty.
pub fn extract_document_text(bytes: &[u8]) -> Result<String, AppError> {
    let doc = Document::load_mem(bytes).map_err(|e| AppError::UnreadablePdf(e.to_string()))?;

    let text = extract_pages(&doc);
    if !text.trim().is_empty() {
        return Ok(text);
    }

    debug!("Per-page extraction found no text, falling back to pdf-extract");
    Ok(extract_with_pdf_extract(bytes).unwrap_or(text))
}

fn extract_pages(doc: &Document) -> String {
    doc.get_pages()
        .keys()
        .map(|&page_number| {
            doc.extract_text(&[page_number]).unwrap_or_else(|e| {
                debug!("No text on page {page_number}: {e}");
                String::new()
            })
        })
        .collect()
}

fn extract_with_pdf_extract(bytes: &[u8]) -> Option<String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            debug!("pdf-extract failed: {e}");
            None
        }
        Err(_) => {
            warn!("pdf-extract panicked while reading document");
            None
        }
    }
}

use super::ExtractionError;

/// Extract the text layer of a PDF.
///
/// Scanned PDFs without a text layer come back empty; callers decide whether
/// that is an error.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    // pdf-extract separates pages with form feeds.
    let pages = text.split('\x0C').filter(|p| !p.trim().is_empty()).count();
    if pages == 0 {
        tracing::warn!("PDF has no extractable text layer");
    } else {
        tracing::debug!(pages, chars = text.len(), "extracted PDF text");
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = extract_pdf(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfError(_)));
    }
}

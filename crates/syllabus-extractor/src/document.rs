//! Plain-text extraction from PDF bytes

use std::panic::{self, AssertUnwindSafe};

/// Extract page-annotated text from a PDF
///
/// Pages are separated by `--- Page N ---` headers. A malformed PDF yields an
/// error message rather than a panic; `pdf-extract` can panic on some inputs.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    let raw = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| "PDF parser panicked on malformed input".to_string())?
        .map_err(|e| format!("Failed to read PDF: {}", e))?;

    Ok(annotate_pages(&raw))
}

/// Normalize whitespace and prefix each non-empty page with a header
pub(crate) fn annotate_pages(raw: &str) -> String {
    let cleaned = raw.replace('\u{a0}', " ");

    let mut out = String::with_capacity(cleaned.len() + 64);
    for (idx, page) in cleaned.split('\u{c}').enumerate() {
        let page = page.trim();
        if page.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&format!("--- Page {} ---\n", idx + 1));
        out.push_str(page);
    }
    out
}

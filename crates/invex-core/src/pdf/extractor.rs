//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextSource, join_pages};
use crate::error::PdfError;

/// Text source backed by lopdf (loading, decryption) and pdf-extract (text layout).
#[derive(Debug, Clone)]
pub struct PdfTextSource {
    try_empty_password: bool,
}

impl PdfTextSource {
    /// Create a new PDF text source.
    pub fn new() -> Self {
        Self {
            try_empty_password: true,
        }
    }

    /// Whether encrypted PDFs are retried with an empty password.
    pub fn with_empty_password(mut self, enabled: bool) -> Self {
        self.try_empty_password = enabled;
        self
    }

    /// Load the document, returning bytes pdf-extract can read.
    fn prepare(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let bytes = if doc.is_encrypted() {
            if !self.try_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(bytes)
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let bytes = self.prepare(data)?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        for (i, page) in pages.iter().enumerate() {
            trace!("Page {}: {} chars", i + 1, page.len());
        }

        Ok(join_pages(pages))
    }
}

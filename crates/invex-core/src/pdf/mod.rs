//! PDF text extraction.

mod extractor;

pub use extractor::PdfTextSource;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Turns an uploaded document into plain text.
pub trait TextSource {
    /// Extract the full text of a document. An image-only PDF may yield an empty string.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

/// Concatenate page texts, each followed by a newline. Blank pages are skipped.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}

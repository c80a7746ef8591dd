//! End-to-end processing run: text, extraction, normalization, aggregation.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::{PdfError, Result};
use crate::invoice::{ExtractorRegistry, VendorExtractor, normalize};
use crate::models::config::RunConfig;
use crate::models::record::{NormalizedRecord, Vendor};
use crate::pdf::{self, TextSource};
use crate::table::{AggregatedTable, FileRecords, aggregate};

/// An uploaded document: file name plus raw bytes.
///
/// A document that could not be loaded keeps its read error, which is
/// reported when the document is processed.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub data: Vec<u8>,
    load_error: Option<String>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
            load_error: None,
        }
    }

    /// A document whose contents could not be loaded.
    pub fn unreadable(name: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            load_error: Some(error.to_string()),
        }
    }

    /// Read a document from disk, named after its file name.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());

        match fs::read(path) {
            Ok(data) => Self::new(name, data),
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                Self::unreadable(name, e)
            }
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// How processing a single file went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// At least one record was extracted.
    Extracted { records: usize },
    /// The extractor ran but found nothing.
    Empty,
    /// Text extraction failed; the file was skipped.
    Failed { message: String },
}

/// Per-file log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLog {
    pub file_name: String,
    pub outcome: FileOutcome,
}

impl FileLog {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }
}

impl fmt::Display for FileLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FileOutcome::Extracted { records: 1 } => write!(f, "{}: 1 record extracted.", self.file_name),
            FileOutcome::Extracted { records } => {
                write!(f, "{}: {} records extracted.", self.file_name, records)
            }
            FileOutcome::Empty => write!(f, "{}: No data found.", self.file_name),
            FileOutcome::Failed { message } => write!(f, "{}: error - {}", self.file_name, message),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub vendor: Vendor,
    pub table: AggregatedTable,
    pub log: Vec<FileLog>,
    pub generated_at: DateTime<Local>,
}

impl RunReport {
    /// Base name for export files, e.g. `mace_extracted_20240105_093000`.
    pub fn export_stem(&self) -> String {
        format!(
            "{}_extracted_{}",
            self.vendor.slug(),
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn error_count(&self) -> usize {
        self.log.iter().filter(|l| l.is_error()).count()
    }

    /// True when no file produced a record.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Sequential processing pipeline over a text source and an extractor registry.
pub struct Pipeline<T> {
    registry: ExtractorRegistry,
    source: T,
}

impl<T: TextSource> Pipeline<T> {
    pub fn new(registry: ExtractorRegistry, source: T) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Process every document in order.
    pub fn run(&self, config: &RunConfig, documents: &[SourceDocument]) -> Result<RunReport> {
        self.run_with_progress(config, documents, |_, _| {})
    }

    /// Like [`Pipeline::run`], calling `on_file` after each document.
    ///
    /// Input is validated before any document is read. A failing document is
    /// logged and skipped; the remaining documents are still processed.
    pub fn run_with_progress<F>(
        &self,
        config: &RunConfig,
        documents: &[SourceDocument],
        mut on_file: F,
    ) -> Result<RunReport>
    where
        F: FnMut(usize, &FileLog),
    {
        let (vendor, ex_rate) = config.validate(documents.len())?;
        let extractor = self.registry.get(vendor)?;

        info!("Extracting {} invoices from {} files", vendor, documents.len());
        let start = Instant::now();

        let mut batches = Vec::with_capacity(documents.len());
        let mut log = Vec::with_capacity(documents.len());

        for (idx, document) in documents.iter().enumerate() {
            let outcome = match self.process_document(extractor, document) {
                Ok(records) => {
                    let found = records.iter().filter(|r| r.has_any()).count();
                    batches.push(FileRecords::new(document.name.clone(), records));
                    if found == 0 {
                        warn!("{}: no data found", document.name);
                        FileOutcome::Empty
                    } else {
                        debug!("{}: {} records", document.name, found);
                        FileOutcome::Extracted { records: found }
                    }
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", document.name, e);
                    FileOutcome::Failed {
                        message: e.to_string(),
                    }
                }
            };

            let entry = FileLog {
                file_name: document.name.clone(),
                outcome,
            };
            on_file(idx, &entry);
            log.push(entry);
        }

        let table = aggregate(batches, Some(ex_rate))?
            .with_fields(extractor.fields())
            .with_local_currency(config.local_currency.clone());

        info!(
            "Extracted {} records from {} files in {:?}",
            table.len(),
            documents.len(),
            start.elapsed()
        );

        Ok(RunReport {
            vendor,
            table,
            log,
            generated_at: Local::now(),
        })
    }

    fn process_document(
        &self,
        extractor: &dyn VendorExtractor,
        document: &SourceDocument,
    ) -> pdf::Result<Vec<NormalizedRecord>> {
        if let Some(e) = document.load_error() {
            return Err(PdfError::Read(e.to_string()));
        }

        let text = self.source.extract_text(&document.data)?;
        debug!("{}: {} characters of text", document.name, text.len());

        Ok(extractor.extract(&text).iter().map(normalize).collect())
    }
}

impl Pipeline<pdf::PdfTextSource> {
    /// Built-in vendors over real PDF text extraction.
    pub fn with_pdf_source(source: pdf::PdfTextSource) -> Self {
        Self::new(ExtractorRegistry::builtin(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_log_display() {
        let log = |outcome| FileLog {
            file_name: "a.pdf".to_string(),
            outcome,
        };
        assert_eq!(log(FileOutcome::Extracted { records: 1 }).to_string(), "a.pdf: 1 record extracted.");
        assert_eq!(log(FileOutcome::Extracted { records: 3 }).to_string(), "a.pdf: 3 records extracted.");
        assert_eq!(log(FileOutcome::Empty).to_string(), "a.pdf: No data found.");
        assert_eq!(
            log(FileOutcome::Failed { message: "boom".into() }).to_string(),
            "a.pdf: error - boom"
        );
    }

    #[test]
    fn test_document_from_missing_path_keeps_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let document = SourceDocument::from_path(&dir.path().join("gone.pdf"));

        assert_eq!(document.name, "gone.pdf");
        assert!(document.data.is_empty());
        assert!(document.load_error().is_some());
    }

    #[test]
    fn test_document_from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let document = SourceDocument::from_path(&path);
        assert_eq!(document.data, b"%PDF-1.4");
        assert_eq!(document.load_error(), None);
    }
}

//! Error types for the invex-core library.

use thiserror::Error;

use crate::models::record::Vendor;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Run input was rejected before any file was processed.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file could not be read.
    #[error("failed to read file: {0}")]
    Read(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to vendor lookup and extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The vendor name does not match any known layout.
    #[error("unknown vendor: {0}")]
    UnknownVendor(String),

    /// The vendor is known but no extractor has been registered for it.
    #[error("no extractor registered for vendor {0}")]
    Unregistered(Vendor),
}

/// Fatal run-level input problems. Nothing is processed when one of these is raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No input files were supplied.
    #[error("no PDF files supplied")]
    NoFiles,

    /// No vendor layout was selected.
    #[error("no vendor selected")]
    NoVendor,

    /// Exchange rate missing or not positive.
    #[error("exchange rate must be greater than 0 (got {0})")]
    InvalidExRate(String),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;

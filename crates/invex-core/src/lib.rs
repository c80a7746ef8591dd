//! Core library for vendor invoice extraction.
//!
//! This crate provides:
//! - PDF text extraction behind a pluggable [`TextSource`]
//! - Per-vendor extraction rules (Mace, Novanta, Cronologic) in a registry
//! - Field normalization with explicit parsed/unparsed amounts
//! - Aggregation across files with exchange-rate conversion

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod table;

pub use error::{InvexError, Result, ValidationError};
pub use invoice::{ExtractorRegistry, VendorExtractor, normalize};
pub use models::config::{InvexConfig, RunConfig};
pub use models::record::{Amount, ExtractedRecord, Field, NormalizedRecord, Vendor};
pub use pdf::{PdfTextSource, TextSource};
pub use pipeline::{FileLog, FileOutcome, Pipeline, RunReport, SourceDocument};
pub use table::{AggregatedTable, Cell, Column, aggregate};

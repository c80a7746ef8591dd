//! Configuration structures for an extraction run.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvexError, Result, ValidationError};
use crate::models::record::Vendor;

/// Options for a single processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Invoice layout to apply. A run without one is rejected.
    pub vendor: Option<Vendor>,

    /// USD to local-currency multiplier. Must be positive.
    pub ex_rate: Option<Decimal>,

    /// Canonicalize column headers (lowercase, underscores, no punctuation).
    pub normalize_column_names: bool,

    /// Report per-file log lines to the user.
    pub show_logs: bool,

    /// Currency code of the converted total column.
    pub local_currency: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            vendor: None,
            ex_rate: None,
            normalize_column_names: false,
            show_logs: true,
            local_currency: default_local_currency(),
        }
    }
}

impl RunConfig {
    pub fn new(vendor: Vendor, ex_rate: Decimal) -> Self {
        Self {
            vendor: Some(vendor),
            ex_rate: Some(ex_rate),
            ..Self::default()
        }
    }

    pub fn with_vendor(mut self, vendor: Option<Vendor>) -> Self {
        self.vendor = vendor;
        self
    }

    pub fn with_ex_rate(mut self, ex_rate: Option<Decimal>) -> Self {
        self.ex_rate = ex_rate;
        self
    }

    pub fn with_normalized_column_names(mut self, normalize: bool) -> Self {
        self.normalize_column_names = normalize;
        self
    }

    pub fn with_logs(mut self, show: bool) -> Self {
        self.show_logs = show;
        self
    }

    pub fn with_local_currency(mut self, code: impl Into<String>) -> Self {
        self.local_currency = code.into();
        self
    }

    /// Selected vendor, or [`ValidationError::NoVendor`].
    pub fn require_vendor(&self) -> std::result::Result<Vendor, ValidationError> {
        self.vendor.ok_or(ValidationError::NoVendor)
    }

    /// Exchange rate, rejecting missing, zero and negative values.
    pub fn require_ex_rate(&self) -> std::result::Result<Decimal, ValidationError> {
        validate_ex_rate(self.ex_rate)
    }

    /// Check a run over `file_count` files can start: files, then vendor, then rate.
    pub fn validate(&self, file_count: usize) -> std::result::Result<(Vendor, Decimal), ValidationError> {
        if file_count == 0 {
            return Err(ValidationError::NoFiles);
        }
        Ok((self.require_vendor()?, self.require_ex_rate()?))
    }
}

/// Accept only a strictly positive exchange rate.
pub fn validate_ex_rate(ex_rate: Option<Decimal>) -> std::result::Result<Decimal, ValidationError> {
    match ex_rate {
        Some(rate) if rate > Decimal::ZERO => Ok(rate),
        Some(rate) => Err(ValidationError::InvalidExRate(rate.to_string())),
        None => Err(ValidationError::InvalidExRate("none".to_string())),
    }
}

pub(crate) fn default_local_currency() -> String {
    "SGD".to_string()
}

/// Defaults loaded from an optional JSON file. Command-line flags win.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Extraction defaults.
    pub extraction: ExtractionConfig,

    /// Export defaults.
    pub export: ExportConfig,

    /// PDF handling.
    pub pdf: PdfConfig,
}

/// Extraction defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Vendor used when none is given on the command line.
    pub default_vendor: Option<Vendor>,
}

/// Export defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Currency code for the converted total column.
    pub local_currency: String,

    /// Worksheet name in spreadsheet exports.
    pub sheet_name: String,

    /// Directory export files are written to.
    pub output_dir: PathBuf,

    /// Canonicalize column headers unless overridden.
    pub normalize_column_names: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            local_currency: default_local_currency(),
            sheet_name: "extracted".to_string(),
            output_dir: PathBuf::from("."),
            normalize_column_names: false,
        }
    }
}

/// PDF handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try an empty password on encrypted PDFs before giving up.
    pub try_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            try_empty_password: true,
        }
    }
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| InvexError::Config(format!("{}: {}", path.display(), e)))
    }
}

//! Regex patterns for the supported vendor invoice layouts.
//!
//! Every pattern is case-insensitive. Amount captures start at the first
//! digit so currency symbols never end up in the value.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric literal with optional thousands separators and decimal part.
const AMOUNT: &str = r"(\d[\d,]*(?:\.\d+)?)";

lazy_static! {
    // Mace: one block per invoice, many blocks per PDF.
    // Groups: 1 = P.O. number, 2 = date, 3 = Sciex PO, 4 = total USD.
    pub static ref MACE_INVOICE_BLOCK: Regex = Regex::new(&format!(
        r"(?is)P\.?O\.?\s*NO\.?\s*[:\-]?\s*(\d+).*?(\d{{1,2}}\s+[a-z]{{3,9}}\s+\d{{4}}).*?DDU\s+Singapore\s+(\d+).*?TOTAL\s+USD\s*[:\-]?\s*\$?\s*{AMOUNT}"
    )).unwrap();

    // Novanta
    pub static ref NOVANTA_DATE: Regex = Regex::new(
        r"(?i)Date\s*[:\-]?\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref NOVANTA_INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice\s*(?:ID|No\.?)\s*[:\-]?\s*(\d+)"
    ).unwrap();

    pub static ref NOVANTA_REFERENCE_PO: Regex = Regex::new(
        r"(?i)ABSCIEX[-\s]*S\s*(\d+)"
    ).unwrap();

    pub static ref NOVANTA_TOTAL: Regex = Regex::new(&format!(
        r"(?i)TOTAL\s+(?:AMOUNT\s+DUE|USD)\s*[:\-]?\s*\$?\s*{AMOUNT}"
    )).unwrap();

    // Cronologic
    pub static ref CRONOLOGIC_DATE: Regex = Regex::new(
        r"(?i)Date\s*[:\-]?\s*(\d{4}-\d{2}-\d{2})"
    ).unwrap();

    pub static ref CRONOLOGIC_INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)Invoice\s*No\.?\s*[:\-]?\s*(\d+)"
    ).unwrap();

    pub static ref CRONOLOGIC_REFERENCE_PO: Regex = Regex::new(
        r"(?i)PO[-\s]?(\d+)"
    ).unwrap();

    pub static ref CRONOLOGIC_TOTAL: Regex = Regex::new(&format!(
        r"(?i)Amount\s+for\s+Payment\s*[:\-]?\s*\$?\s*{AMOUNT}"
    )).unwrap();
}

//! Extracted invoice record models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Invoice layout family. Selects which extraction rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// Multi-invoice PDFs, one combined pattern per invoice block.
    #[serde(alias = "Mace")]
    Mace,
    /// One invoice per PDF, `DD/MM/YYYY` dates, `ABSCIEX-S` reference.
    #[serde(alias = "Novanta")]
    Novanta,
    /// One invoice per PDF, ISO dates, `PO-` reference.
    #[serde(alias = "Cronologic")]
    Cronologic,
}

impl Vendor {
    /// All known vendors in menu order.
    pub const ALL: [Vendor; 3] = [Vendor::Mace, Vendor::Novanta, Vendor::Cronologic];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Mace => "Mace",
            Vendor::Novanta => "Novanta",
            Vendor::Cronologic => "Cronologic",
        }
    }

    /// Lowercase identifier used in file names and config files.
    pub fn slug(&self) -> &'static str {
        match self {
            Vendor::Mace => "mace",
            Vendor::Novanta => "novanta",
            Vendor::Cronologic => "cronologic",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Vendor::ALL
            .into_iter()
            .find(|v| v.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExtractionError::UnknownVendor(wanted.to_string()))
    }
}

/// Logical invoice field. Declaration order is column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceDate,
    PoNumber,
    InvoiceNumber,
    /// Secondary PO assigned by the receiving party ("Sciex PO").
    ReferencePo,
    TotalValueUsd,
}

impl Field {
    /// Column header shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Field::InvoiceDate => "Invoice Date",
            Field::PoNumber => "P.O. NO",
            Field::InvoiceNumber => "Invoice NO",
            Field::ReferencePo => "Sciex PO",
            Field::TotalValueUsd => "Total Invoice Value (USD)",
        }
    }

    /// Stable snake_case key.
    pub fn key(&self) -> &'static str {
        match self {
            Field::InvoiceDate => "invoice_date",
            Field::PoNumber => "po_number",
            Field::InvoiceNumber => "invoice_number",
            Field::ReferencePo => "reference_po",
            Field::TotalValueUsd => "total_value_usd",
        }
    }

    /// Whether the field holds a money amount.
    pub fn is_monetary(&self) -> bool {
        matches!(self, Field::TotalValueUsd)
    }
}

/// Raw field values captured from one invoice.
///
/// A field key is present when the extractor looked for it; the value is
/// `None` when the pattern did not match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    fields: BTreeMap<Field, Option<String>>,
}

impl ExtractedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        self.fields.insert(field, value);
    }

    /// Builder form of [`ExtractedRecord::set`].
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Captured value for a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).and_then(|v| v.as_deref())
    }

    /// Iterate over all fields the extractor reported.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_deref()))
    }

    /// True when at least one field holds non-blank text.
    pub fn has_any(&self) -> bool {
        self.fields
            .values()
            .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

/// Best-effort parse result for a monetary field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Amount {
    Parsed(Decimal),
    /// The original text, kept when it did not parse as a number.
    Unparsed(String),
}

impl Amount {
    /// Numeric value, or `None` for unparsed text.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Parsed(v) => Some(*v),
            Amount::Unparsed(_) => None,
        }
    }
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Amount(Amount),
}

/// Record after whitespace trimming and amount coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    fields: BTreeMap<Field, Option<FieldValue>>,
}

impl NormalizedRecord {
    pub(crate) fn insert(&mut self, field: Field, value: Option<FieldValue>) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field).and_then(|v| v.as_ref())
    }

    /// Text value of a non-monetary field.
    pub fn text(&self, field: Field) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// The USD total, parsed or not.
    pub fn total_usd(&self) -> Option<&Amount> {
        match self.get(Field::TotalValueUsd) {
            Some(FieldValue::Amount(a)) => Some(a),
            _ => None,
        }
    }

    /// Fields this record carries, in column order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    pub fn has_any(&self) -> bool {
        self.fields.values().any(Option::is_some)
    }
}

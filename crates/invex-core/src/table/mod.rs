//! Aggregated result table with display and export views.

mod aggregator;

pub use aggregator::{FileRecords, aggregate};

use rust_decimal::Decimal;

use crate::invoice::rules::format_amount;
use crate::models::record::{Amount, Field, FieldValue, NormalizedRecord};

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Name of the PDF the row came from.
    SourceFile,
    /// An extracted invoice field.
    Field(Field),
    /// Exchange rate applied to the row.
    ExRate,
    /// USD total converted to the local currency.
    LocalTotal,
}

impl Column {
    /// Human-readable header.
    pub fn label(&self, local_currency: &str) -> String {
        match self {
            Column::SourceFile => "Source File".to_string(),
            Column::Field(field) => field.label().to_string(),
            Column::ExRate => "EX RATE".to_string(),
            Column::LocalTotal => format!("Total Invoice Value ({})", local_currency),
        }
    }
}

/// Lowercase, turn whitespace into underscores and drop punctuation.
pub fn canonicalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_punctuation() && c != '_' {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

/// A single table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    /// Money: shown with separators and two decimals.
    Amount(Decimal),
    /// Plain number shown as-is.
    Number(Decimal),
}

impl Cell {
    /// Value as shown to users.
    pub fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Amount(v) => format_amount(*v),
            Cell::Number(v) => v.normalize().to_string(),
        }
    }

    /// Value as written to export files: numbers unformatted.
    pub fn export_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Amount(v) | Cell::Number(v) => v.normalize().to_string(),
        }
    }

    /// Numeric value, if the cell holds one.
    pub fn number(&self) -> Option<Decimal> {
        match self {
            Cell::Amount(v) | Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub source_file: String,
    pub record: NormalizedRecord,
    pub ex_rate: Decimal,
    /// `None` when the USD total is missing or unparsed.
    pub local_total: Option<Decimal>,
}

impl AggregatedRow {
    /// Value of a column for this row.
    pub fn cell(&self, column: Column) -> Cell {
        match column {
            Column::SourceFile => Cell::Text(self.source_file.clone()),
            Column::Field(field) => match self.record.get(field) {
                None => Cell::Empty,
                Some(FieldValue::Text(s)) => Cell::Text(s.clone()),
                Some(FieldValue::Amount(Amount::Parsed(v))) => Cell::Amount(*v),
                Some(FieldValue::Amount(Amount::Unparsed(s))) => Cell::Text(s.clone()),
            },
            Column::ExRate => Cell::Number(self.ex_rate),
            Column::LocalTotal => self.local_total.map(Cell::Amount).unwrap_or(Cell::Empty),
        }
    }
}

/// Records from every file of a run, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    fields: Vec<Field>,
    rows: Vec<AggregatedRow>,
    ex_rate: Decimal,
    local_currency: String,
}

impl AggregatedTable {
    /// Set the currency code used in the converted total header.
    pub fn with_local_currency(mut self, code: impl Into<String>) -> Self {
        self.local_currency = code.into();
        self
    }

    /// Make sure the given fields have columns even if no row carries them.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self.fields.sort();
        self.fields.dedup();
        self
    }

    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ex_rate(&self) -> Decimal {
        self.ex_rate
    }

    pub fn local_currency(&self) -> &str {
        &self.local_currency
    }

    /// Columns in output order.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::SourceFile];
        columns.extend(self.fields.iter().copied().map(Column::Field));
        columns.push(Column::ExRate);
        columns.push(Column::LocalTotal);
        columns
    }

    /// Header row, optionally canonicalized.
    pub fn headers(&self, normalize_names: bool) -> Vec<String> {
        self.columns()
            .iter()
            .map(|c| {
                let label = c.label(&self.local_currency);
                if normalize_names {
                    canonicalize_column_name(&label)
                } else {
                    label
                }
            })
            .collect()
    }

    /// Typed cells for every row.
    pub fn cells(&self) -> Vec<Vec<Cell>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().map(|c| row.cell(*c)).collect())
            .collect()
    }

    /// Rows formatted for display.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.cells()
            .iter()
            .map(|row| row.iter().map(Cell::display).collect())
            .collect()
    }

    /// Rows formatted for export.
    pub fn export_rows(&self) -> Vec<Vec<String>> {
        self.cells()
            .iter()
            .map(|row| row.iter().map(Cell::export_text).collect())
            .collect()
    }
}

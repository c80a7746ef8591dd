//! Export writers for the aggregated table.

use std::fs;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Number, Value};

use invex_core::{AggregatedTable, Cell};

/// Supported export file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Excel workbook
    Xlsx,
    /// Comma-separated values
    Csv,
    /// JSON array of row objects
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Write the table in the given format.
pub fn write_table(
    format: ExportFormat,
    table: &AggregatedTable,
    normalize_names: bool,
    sheet_name: &str,
    path: &Path,
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Xlsx => write_xlsx(table, normalize_names, sheet_name, path),
        ExportFormat::Csv => write_csv(table, normalize_names, path),
        ExportFormat::Json => write_json(table, normalize_names, path),
    }
}

/// CSV with unformatted numbers.
pub fn write_csv(table: &AggregatedTable, normalize_names: bool, path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(table.headers(normalize_names))?;
    for row in table.export_rows() {
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Single-sheet workbook; numeric cells are stored as numbers.
pub fn write_xlsx(
    table: &AggregatedTable,
    normalize_names: bool,
    sheet_name: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in table.headers(normalize_names).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (idx, row) in table.cells().iter().enumerate() {
        let xl_row = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let xl_col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(xl_row, xl_col, s)?;
                }
                Cell::Amount(v) | Cell::Number(v) => match v.to_f64() {
                    Some(n) => {
                        worksheet.write_number(xl_row, xl_col, n)?;
                    }
                    None => {
                        worksheet.write_string(xl_row, xl_col, cell.export_text())?;
                    }
                },
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    workbook.save(path)?;
    Ok(())
}

/// JSON array with one object per row, keyed by header.
pub fn write_json(table: &AggregatedTable, normalize_names: bool, path: &Path) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(&json_rows(table, normalize_names))?;
    fs::write(path, content)?;
    Ok(())
}

fn json_rows(table: &AggregatedTable, normalize_names: bool) -> Vec<Value> {
    let headers = table.headers(normalize_names);

    table
        .cells()
        .into_iter()
        .map(|row| {
            let object: Map<String, Value> = headers
                .iter()
                .cloned()
                .zip(row.iter().map(json_value))
                .collect();
            Value::Object(object)
        })
        .collect()
}

fn json_value(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Amount(v) | Cell::Number(v) => v
            .to_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.export_text())),
    }
}

//! Merges per-file records into one table and applies the exchange rate.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{AggregatedRow, AggregatedTable};
use crate::error::ValidationError;
use crate::models::config::{default_local_currency, validate_ex_rate};
use crate::models::record::{Amount, NormalizedRecord};

/// Normalized records of one source file, in detection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecords {
    pub file_name: String,
    pub records: Vec<NormalizedRecord>,
}

impl FileRecords {
    pub fn new(file_name: impl Into<String>, records: Vec<NormalizedRecord>) -> Self {
        Self {
            file_name: file_name.into(),
            records,
        }
    }
}

/// Concatenate file batches in order, tag rows with their file and convert totals.
///
/// Records without any field value are dropped. A missing or non-positive
/// exchange rate is rejected; no table is built in that case. A total that is
/// unparsed, or whose converted value is out of range, gets no local total.
pub fn aggregate(
    batches: Vec<FileRecords>,
    ex_rate: Option<Decimal>,
) -> Result<AggregatedTable, ValidationError> {
    let ex_rate = validate_ex_rate(ex_rate)?;

    let mut fields = Vec::new();
    let mut rows = Vec::new();

    for batch in batches {
        for record in batch.records {
            if !record.has_any() {
                debug!("Dropping empty record from {}", batch.file_name);
                continue;
            }

            let local_total = match record.total_usd() {
                Some(Amount::Parsed(usd)) => {
                    let converted = usd.checked_mul(ex_rate);
                    if converted.is_none() {
                        warn!(
                            "{}: total {} times rate {} is out of range, skipping currency conversion",
                            batch.file_name, usd, ex_rate
                        );
                    }
                    converted
                }
                Some(Amount::Unparsed(raw)) => {
                    warn!(
                        "{}: total {:?} is not numeric, skipping currency conversion",
                        batch.file_name, raw
                    );
                    None
                }
                None => None,
            };

            fields.extend(record.fields());
            rows.push(AggregatedRow {
                source_file: batch.file_name.clone(),
                record,
                ex_rate,
                local_total,
            });
        }
    }

    fields.sort();
    fields.dedup();

    Ok(AggregatedTable {
        fields,
        rows,
        ex_rate,
        local_currency: default_local_currency(),
    })
}

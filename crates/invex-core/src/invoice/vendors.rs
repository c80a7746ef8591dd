//! Rule sets for each supported vendor layout.

use super::extractor::{RepeatedExtractor, SingleShotExtractor};
use super::rules::patterns::*;
use super::rules::{FieldRule, GroupBinding};
use crate::models::record::Field;

/// Mace: several invoices per PDF, each block carries all four fields.
pub fn mace() -> RepeatedExtractor {
    RepeatedExtractor::new(
        &MACE_INVOICE_BLOCK,
        vec![
            GroupBinding::new(Field::InvoiceDate, 2),
            GroupBinding::new(Field::PoNumber, 1),
            GroupBinding::new(Field::ReferencePo, 3),
            GroupBinding::new(Field::TotalValueUsd, 4),
        ],
    )
}

/// Novanta: one invoice per PDF.
pub fn novanta() -> SingleShotExtractor {
    SingleShotExtractor::new(vec![
        FieldRule::new(Field::InvoiceDate, &NOVANTA_DATE),
        FieldRule::new(Field::InvoiceNumber, &NOVANTA_INVOICE_NUMBER),
        FieldRule::new(Field::ReferencePo, &NOVANTA_REFERENCE_PO),
        FieldRule::new(Field::TotalValueUsd, &NOVANTA_TOTAL),
    ])
}

/// Cronologic: one invoice per PDF.
pub fn cronologic() -> SingleShotExtractor {
    SingleShotExtractor::new(vec![
        FieldRule::new(Field::InvoiceDate, &CRONOLOGIC_DATE),
        FieldRule::new(Field::InvoiceNumber, &CRONOLOGIC_INVOICE_NUMBER),
        FieldRule::new(Field::ReferencePo, &CRONOLOGIC_REFERENCE_PO),
        FieldRule::new(Field::TotalValueUsd, &CRONOLOGIC_TOTAL),
    ])
}

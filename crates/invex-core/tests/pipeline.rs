//! Pipeline behaviour over an in-memory text source.

use std::collections::HashMap;
use std::str::FromStr;

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use invex_core::error::PdfError;
use invex_core::pdf;
use invex_core::{
    Cell, Column, ExtractorRegistry, Field, FileOutcome, InvexError, Pipeline, RunConfig,
    SourceDocument, TextSource, ValidationError, Vendor,
};

/// Looks documents up by their bytes; `FAIL` bytes raise an extraction error.
struct FakeText {
    pages: HashMap<Vec<u8>, String>,
}

impl FakeText {
    fn new(docs: &[(&str, &str)]) -> Self {
        Self {
            pages: docs
                .iter()
                .map(|(key, text)| (key.as_bytes().to_vec(), text.to_string()))
                .collect(),
        }
    }
}

impl TextSource for FakeText {
    fn extract_text(&self, data: &[u8]) -> pdf::Result<String> {
        if data == b"FAIL" {
            return Err(PdfError::Parse("unexpected end of file".to_string()));
        }
        Ok(self.pages.get(data).cloned().unwrap_or_default())
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn doc(name: &str, key: &str) -> SourceDocument {
    SourceDocument::new(name, key.as_bytes().to_vec())
}

const MACE_TEXT: &str = "P.O. NO. 1001\nInvoice Date 05 Jan 2024\nDDU Singapore 9001\nTOTAL USD: 1,000.00\n\
Terms and conditions apply.\n\
P.O. NO. 1002\nInvoice Date 10 Feb 2024\nDDU Singapore 9002\nTOTAL USD: 2,500.50\n";

#[test]
fn mace_two_blocks_with_exchange_rate() {
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[("m", MACE_TEXT)]));
    let config = RunConfig::new(Vendor::Mace, dec("1.35"));

    let report = pipeline.run(&config, &[doc("mace.pdf", "m")]).unwrap();
    let rows = report.table.rows();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].record.text(Field::PoNumber), Some("1001"));
    assert_eq!(rows[0].record.text(Field::InvoiceDate), Some("05 Jan 2024"));
    assert_eq!(rows[0].record.text(Field::ReferencePo), Some("9001"));
    assert_eq!(rows[0].cell(Column::Field(Field::TotalValueUsd)).number(), Some(dec("1000.00")));
    assert_eq!(rows[0].local_total, Some(dec("1350.00")));

    assert_eq!(rows[1].record.text(Field::PoNumber), Some("1002"));
    assert_eq!(rows[1].record.text(Field::InvoiceDate), Some("10 Feb 2024"));
    assert_eq!(rows[1].record.text(Field::ReferencePo), Some("9002"));
    assert_eq!(rows[1].cell(Column::Field(Field::TotalValueUsd)).number(), Some(dec("2500.50")));
    assert_eq!(rows[1].local_total, Some(dec("3375.675")));

    assert_eq!(
        report.log[0].outcome,
        FileOutcome::Extracted { records: 2 }
    );
}

#[test]
fn novanta_partial_record_is_kept() {
    let text = "Invoice ID: 5551\nTOTAL AMOUNT DUE: $200.00\n";
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[("n", text)]));
    let config = RunConfig::new(Vendor::Novanta, Decimal::ONE);

    let report = pipeline.run(&config, &[doc("novanta.pdf", "n")]).unwrap();
    assert_eq!(report.table.len(), 1);

    let row = &report.table.rows()[0];
    assert_eq!(row.record.text(Field::InvoiceNumber), Some("5551"));
    assert_eq!(row.cell(Column::Field(Field::TotalValueUsd)), Cell::Amount(dec("200.00")));
    assert_eq!(row.cell(Column::Field(Field::InvoiceDate)), Cell::Empty);
    assert_eq!(row.cell(Column::Field(Field::ReferencePo)), Cell::Empty);
}

#[test]
fn single_shot_without_anchors_is_discarded_and_warned() {
    let pipeline = Pipeline::new(
        ExtractorRegistry::builtin(),
        FakeText::new(&[("c", "Packing list only\nNo pricing")]),
    );
    let config = RunConfig::new(Vendor::Cronologic, Decimal::ONE);

    let report = pipeline.run(&config, &[doc("packing.pdf", "c")]).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.log[0].outcome, FileOutcome::Empty);
    // columns still describe the vendor layout
    assert_eq!(report.table.columns().len(), 7);
}

#[test]
fn failing_file_is_isolated() {
    let text = "Invoice No: 10\nDate: 2024-01-02\nPO-77\nAmount for Payment: 50.00";
    let pipeline = Pipeline::new(
        ExtractorRegistry::builtin(),
        FakeText::new(&[("one", text), ("three", text)]),
    );
    let config = RunConfig::new(Vendor::Cronologic, dec("1.5"));

    let report = pipeline
        .run(
            &config,
            &[doc("one.pdf", "one"), doc("two.pdf", "FAIL"), doc("three.pdf", "three")],
        )
        .unwrap();

    let sources: Vec<_> = report.table.rows().iter().map(|r| r.source_file.as_str()).collect();
    assert_eq!(sources, vec!["one.pdf", "three.pdf"]);

    assert_eq!(report.error_count(), 1);
    let errors: Vec<_> = report.log.iter().filter(|l| l.is_error()).collect();
    assert_eq!(errors[0].file_name, "two.pdf");
    assert_eq!(report.log.len(), 3);
}

#[test]
fn non_positive_rate_blocks_the_run() {
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[("m", MACE_TEXT)]));
    let mut visited = 0;

    for rate in [Decimal::ZERO, dec("-1")] {
        let config = RunConfig::new(Vendor::Mace, rate);
        let result = pipeline.run_with_progress(&config, &[doc("mace.pdf", "m")], |_, _| visited += 1);
        assert!(matches!(
            result,
            Err(InvexError::Validation(ValidationError::InvalidExRate(_)))
        ));
    }
    assert_eq!(visited, 0);
}

#[test]
fn missing_files_or_vendor_block_the_run() {
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[]));

    let config = RunConfig::new(Vendor::Mace, Decimal::ONE);
    assert!(matches!(
        pipeline.run(&config, &[]),
        Err(InvexError::Validation(ValidationError::NoFiles))
    ));

    let config = RunConfig {
        ex_rate: Some(Decimal::ONE),
        ..RunConfig::default()
    };
    assert!(matches!(
        pipeline.run(&config, &[doc("a.pdf", "a")]),
        Err(InvexError::Validation(ValidationError::NoVendor))
    ));
}

#[test]
fn export_stem_names_vendor() {
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[("m", MACE_TEXT)]));
    let report = pipeline
        .run(&RunConfig::new(Vendor::Mace, Decimal::ONE), &[doc("mace.pdf", "m")])
        .unwrap();

    let stem = report.export_stem();
    assert!(stem.starts_with("mace_extracted_"));
    assert_eq!(stem.len(), "mace_extracted_".len() + "20240105_093000".len());
}

#[test]
fn unreadable_document_is_logged_in_order() {
    let text = "Invoice No: 10\nDate: 2024-01-02\nPO-77\nAmount for Payment: 50.00";
    let pipeline = Pipeline::new(
        ExtractorRegistry::builtin(),
        FakeText::new(&[("one", text), ("three", text)]),
    );
    let config = RunConfig::new(Vendor::Cronologic, Decimal::ONE);

    let documents = [
        doc("one.pdf", "one"),
        SourceDocument::unreadable("two.pdf", "permission denied"),
        doc("three.pdf", "three"),
    ];
    let report = pipeline.run(&config, &documents).unwrap();

    let names: Vec<_> = report.log.iter().map(|l| l.file_name.as_str()).collect();
    assert_eq!(names, vec!["one.pdf", "two.pdf", "three.pdf"]);
    assert_eq!(report.error_count(), 1);
    assert_eq!(
        report.log[1].to_string(),
        "two.pdf: error - failed to read file: permission denied"
    );
    assert_eq!(report.table.len(), 2);
}

#[test]
fn run_with_only_unreadable_documents_completes() {
    let pipeline = Pipeline::new(ExtractorRegistry::builtin(), FakeText::new(&[]));
    let config = RunConfig::new(Vendor::Mace, Decimal::ONE);

    let documents = [
        SourceDocument::unreadable("a.pdf", "no such file"),
        SourceDocument::unreadable("b.pdf", "no such file"),
    ];
    let report = pipeline.run(&config, &documents).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.error_count(), 2);
}

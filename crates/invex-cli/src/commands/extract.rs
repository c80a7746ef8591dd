//! Extract command - pull vendor invoice fields from PDFs into one table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use invex_core::{FileLog, FileOutcome, PdfTextSource, Pipeline, RunConfig, SourceDocument, Vendor};

use super::load_config;
use crate::export::{self, ExportFormat};
use crate::render;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF files or glob patterns
    inputs: Vec<String>,

    /// Vendor layout (mace, novanta, cronologic)
    #[arg(long)]
    vendor: Option<Vendor>,

    /// USD to local-currency exchange rate
    #[arg(short = 'r', long = "ex-rate", allow_negative_numbers = true)]
    ex_rate: Option<Decimal>,

    /// Local currency code for the converted total
    #[arg(long)]
    currency: Option<String>,

    /// Canonicalize column names (lowercase, underscores)
    #[arg(long)]
    normalize_columns: bool,

    /// Do not print per-file log lines
    #[arg(long)]
    hide_logs: bool,

    /// Output directory for export files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Export formats
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [ExportFormat::Xlsx, ExportFormat::Csv]
    )]
    format: Vec<ExportFormat>,

    /// Only show the table, write no files
    #[arg(long)]
    no_export: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let run_config = RunConfig::default()
        .with_vendor(args.vendor.or(config.extraction.default_vendor))
        .with_ex_rate(args.ex_rate)
        .with_normalized_column_names(args.normalize_columns || config.export.normalize_column_names)
        .with_logs(!args.hide_logs)
        .with_local_currency(
            args.currency
                .clone()
                .unwrap_or_else(|| config.export.local_currency.clone()),
        );

    let files = discover_inputs(&args.inputs)?;
    // Reject the run before touching any file
    let (vendor, _) = run_config.validate(files.len())?;

    println!(
        "{} Found {} {} files to process",
        style("ℹ").blue(),
        files.len(),
        vendor
    );

    // Read failures stay with their document and are reported in input order
    let documents: Vec<SourceDocument> = files.iter().map(|p| SourceDocument::from_path(p)).collect();

    let source = PdfTextSource::new().with_empty_password(config.pdf.try_empty_password);
    let pipeline = Pipeline::with_pdf_source(source);

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let report = pipeline.run_with_progress(&run_config, &documents, |_, entry| {
        pb.set_message(entry.file_name.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if run_config.show_logs {
        for entry in &report.log {
            print_log_line(entry);
        }
    }

    if report.error_count() > 0 {
        println!(
            "{} {} of {} files failed",
            style("✗").red(),
            report.error_count(),
            report.log.len()
        );
    }

    if report.is_empty() {
        println!();
        println!(
            "{} No invoice data extracted from the uploaded files.",
            style("⚠").yellow()
        );
        return Ok(());
    }

    println!();
    println!("{}", style(format!("Extracted data ({})", report.vendor)).bold());
    print!(
        "{}",
        render::render_table(&report.table, run_config.normalize_column_names)
    );

    if !args.no_export {
        let output_dir = args.output_dir.unwrap_or(config.export.output_dir);
        fs::create_dir_all(&output_dir)?;

        let stem = report.export_stem();
        for format in unique_formats(&args.format) {
            let path = output_dir.join(format!("{}.{}", stem, format.extension()));
            export::write_table(
                format,
                &report.table,
                run_config.normalize_column_names,
                &config.export.sheet_name,
                &path,
            )?;
            debug!("Wrote {} export to {}", format.extension(), path.display());
            println!("{} Wrote {}", style("✓").green(), path.display());
        }
    }

    println!();
    println!(
        "{} Extracted {} records from {} files in {:?}",
        style("✓").green(),
        report.table.len(),
        report.log.len(),
        start.elapsed()
    );
    Ok(())
}

fn print_log_line(entry: &FileLog) {
    let glyph = match entry.outcome {
        FileOutcome::Extracted { .. } => style("✓").green(),
        FileOutcome::Empty => style("⚠").yellow(),
        FileOutcome::Failed { .. } => style("✗").red(),
    };
    println!("{} {}", glyph, entry);
}

/// Expand paths and glob patterns into PDF files, keeping input order.
pub(crate) fn discover_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        let mut matched = 0;
        for path in glob(input)?.filter_map(|r| r.ok()) {
            if !is_pdf(&path) {
                debug!("Skipping non-PDF input {}", path.display());
                continue;
            }
            matched += 1;
            if !files.contains(&path) {
                files.push(path);
            }
        }
        if matched == 0 {
            warn!("No PDF files match {}", input);
        }
    }

    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    !path.is_dir()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn unique_formats(formats: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut unique = Vec::with_capacity(formats.len());
    for format in formats {
        if !unique.contains(format) {
            unique.push(*format);
        }
    }
    unique
}

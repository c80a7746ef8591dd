//! Text command - print the text layer the extractors see.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use invex_core::{PdfTextSource, TextSource};

use super::load_config;

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,
}

pub fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let source = PdfTextSource::new().with_empty_password(config.pdf.try_empty_password);
    let text = source.extract_text(&data)?;

    info!("Extracted {} characters from {}", text.len(), args.input.display());
    if text.trim().is_empty() {
        eprintln!("No text layer found in {}", args.input.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

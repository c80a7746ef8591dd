//! CLI application for vendor invoice extraction.

mod commands;
mod export;
mod render;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{extract, text, vendors};

/// Vendor invoice extraction - Pull fields from vendor PDF invoices into one table
#[derive(Parser)]
#[command(name = "invex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract invoice fields from PDF files and export the table
    Extract(extract::ExtractArgs),

    /// List supported vendors
    Vendors,

    /// Print the text layer of a PDF
    Text(text::TextArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Vendors => vendors::run(),
        Commands::Text(args) => text::run(args, cli.config.as_deref()),
    }
}

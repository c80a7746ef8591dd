//! Vendors command - list the supported invoice layouts.

use console::style;

use invex_core::ExtractorRegistry;

pub fn run() -> anyhow::Result<()> {
    let registry = ExtractorRegistry::builtin();

    println!("{}", style("Supported vendors:").bold());
    for vendor in registry.vendors() {
        let extractor = registry.get(vendor)?;
        let fields: Vec<_> = extractor.fields().iter().map(|f| f.label()).collect();

        println!(
            "  {} {:<12} {:<12} {}",
            style("•").cyan(),
            vendor.slug(),
            extractor.strategy(),
            style(fields.join(", ")).dim()
        );
    }

    Ok(())
}

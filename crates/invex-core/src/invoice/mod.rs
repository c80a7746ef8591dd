//! Vendor invoice field extraction.

mod extractor;
pub mod normalizer;
pub mod rules;
pub mod vendors;

pub use extractor::{RepeatedExtractor, SingleShotExtractor};
pub use normalizer::normalize;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::record::{ExtractedRecord, Field, Vendor};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for vendor-specific invoice extractors.
///
/// Implementations never fail on odd input: text without any recognizable
/// anchor simply produces fewer records.
pub trait VendorExtractor: Send + Sync {
    /// Short name of the extraction strategy, for display.
    fn strategy(&self) -> &'static str;

    /// Fields this extractor reports, in column order.
    fn fields(&self) -> Vec<Field>;

    /// Extract zero or more records from plain invoice text.
    fn extract(&self, text: &str) -> Vec<ExtractedRecord>;
}

/// Maps each vendor to the extractor that understands its layout.
pub struct ExtractorRegistry {
    extractors: BTreeMap<Vendor, Box<dyn VendorExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            extractors: BTreeMap::new(),
        }
    }

    /// A registry with every built-in vendor layout.
    pub fn builtin() -> Self {
        Self::new()
            .with(Vendor::Mace, vendors::mace())
            .with(Vendor::Novanta, vendors::novanta())
            .with(Vendor::Cronologic, vendors::cronologic())
    }

    /// Register (or replace) the extractor for a vendor.
    pub fn register(&mut self, vendor: Vendor, extractor: Box<dyn VendorExtractor>) {
        debug!("Registering {} extractor for {}", extractor.strategy(), vendor);
        self.extractors.insert(vendor, extractor);
    }

    pub fn with(mut self, vendor: Vendor, extractor: impl VendorExtractor + 'static) -> Self {
        self.register(vendor, Box::new(extractor));
        self
    }

    /// Extractor for a vendor.
    pub fn get(&self, vendor: Vendor) -> Result<&dyn VendorExtractor> {
        self.extractors
            .get(&vendor)
            .map(|e| e.as_ref())
            .ok_or(ExtractionError::Unregistered(vendor))
    }

    /// Run the vendor's extractor over `text`.
    pub fn extract(&self, vendor: Vendor, text: &str) -> Result<Vec<ExtractedRecord>> {
        Ok(self.get(vendor)?.extract(text))
    }

    /// Registered vendors in menu order.
    pub fn vendors(&self) -> impl Iterator<Item = Vendor> + '_ {
        self.extractors.keys().copied()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl VendorExtractor for Fixed {
        fn strategy(&self) -> &'static str {
            "fixed"
        }

        fn fields(&self) -> Vec<Field> {
            vec![Field::PoNumber]
        }

        fn extract(&self, _text: &str) -> Vec<ExtractedRecord> {
            vec![ExtractedRecord::new().with(Field::PoNumber, "42")]
        }
    }

    #[test]
    fn test_builtin_registry_has_all_vendors() {
        let registry = ExtractorRegistry::builtin();
        assert_eq!(registry.vendors().collect::<Vec<_>>(), Vendor::ALL.to_vec());
        assert_eq!(registry.get(Vendor::Mace).unwrap().strategy(), "multi-record");
        assert_eq!(registry.get(Vendor::Novanta).unwrap().strategy(), "single-shot");
    }

    #[test]
    fn test_unregistered_vendor_is_an_error() {
        let registry = ExtractorRegistry::new();
        assert!(matches!(
            registry.extract(Vendor::Cronologic, "text"),
            Err(ExtractionError::Unregistered(Vendor::Cronologic))
        ));
    }

    #[test]
    fn test_register_replaces_extractor() {
        let registry = ExtractorRegistry::builtin().with(Vendor::Mace, Fixed);
        let records = registry.extract(Vendor::Mace, "anything").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::PoNumber), Some("42"));
    }

    #[test]
    fn test_vendor_fields_follow_rule_order() {
        let registry = ExtractorRegistry::builtin();
        assert_eq!(
            registry.get(Vendor::Novanta).unwrap().fields(),
            vec![Field::InvoiceDate, Field::InvoiceNumber, Field::ReferencePo, Field::TotalValueUsd]
        );
    }
}

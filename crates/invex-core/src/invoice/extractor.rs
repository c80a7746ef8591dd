//! The two extraction strategies behind every vendor layout.

use regex::Regex;
use tracing::{debug, trace};

use super::VendorExtractor;
use super::rules::{FieldRule, GroupBinding, capture};
use crate::models::record::{ExtractedRecord, Field};

/// Searches each field independently, once. Always yields one record.
#[derive(Debug, Clone)]
pub struct SingleShotExtractor {
    rules: Vec<FieldRule>,
}

impl SingleShotExtractor {
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

impl VendorExtractor for SingleShotExtractor {
    fn strategy(&self) -> &'static str {
        "single-shot"
    }

    fn fields(&self) -> Vec<Field> {
        self.rules.iter().map(|r| r.field).collect()
    }

    fn extract(&self, text: &str) -> Vec<ExtractedRecord> {
        let mut record = ExtractedRecord::new();

        for rule in &self.rules {
            let value = rule.find(text);
            trace!("{:?} -> {:?}", rule.field, value);
            record.set(rule.field, value);
        }

        vec![record]
    }
}

/// Applies one combined pattern across the whole text, one record per match.
#[derive(Debug, Clone)]
pub struct RepeatedExtractor {
    pattern: Regex,
    bindings: Vec<GroupBinding>,
}

impl RepeatedExtractor {
    pub fn new(pattern: &Regex, bindings: Vec<GroupBinding>) -> Self {
        Self {
            pattern: pattern.clone(),
            bindings,
        }
    }
}

impl VendorExtractor for RepeatedExtractor {
    fn strategy(&self) -> &'static str {
        "multi-record"
    }

    fn fields(&self) -> Vec<Field> {
        self.bindings.iter().map(|b| b.field).collect()
    }

    fn extract(&self, text: &str) -> Vec<ExtractedRecord> {
        let records: Vec<ExtractedRecord> = self
            .pattern
            .captures_iter(text)
            .map(|caps| {
                let mut record = ExtractedRecord::new();
                for binding in &self.bindings {
                    let value = capture(&caps, binding.group).map(|s| s.trim().to_string());
                    record.set(binding.field, value);
                }
                record
            })
            .filter(ExtractedRecord::has_any)
            .collect();

        debug!("Matched {} invoice blocks", records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shot_missing_field_does_not_block_others() {
        let extractor = SingleShotExtractor::new(vec![
            FieldRule::new(Field::InvoiceNumber, &Regex::new(r"INV(\d+)").unwrap()),
            FieldRule::new(Field::PoNumber, &Regex::new(r"PO(\d+)").unwrap()),
        ]);

        let records = extractor.extract("INV12 and nothing else");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(Field::InvoiceNumber), Some("12"));
        assert_eq!(records[0].get(Field::PoNumber), None);
    }

    #[test]
    fn test_single_shot_empty_text_yields_blank_record() {
        let extractor = SingleShotExtractor::new(vec![FieldRule::new(
            Field::InvoiceNumber,
            &Regex::new(r"INV(\d+)").unwrap(),
        )]);

        let records = extractor.extract("");
        assert_eq!(records.len(), 1);
        assert!(!records[0].has_any());
    }

    #[test]
    fn test_repeated_returns_each_match_in_order() {
        let extractor = RepeatedExtractor::new(
            &Regex::new(r"#(\d+):(\w*)").unwrap(),
            vec![
                GroupBinding::new(Field::PoNumber, 1),
                GroupBinding::new(Field::ReferencePo, 2),
            ],
        );

        let records = extractor.extract("#1:a junk #2:b more junk #3:");
        let pos: Vec<_> = records.iter().map(|r| r.get(Field::PoNumber)).collect();
        assert_eq!(pos, vec![Some("1"), Some("2"), Some("3")]);
        assert_eq!(records[2].get(Field::ReferencePo), Some(""));
    }

    #[test]
    fn test_repeated_no_match_is_empty() {
        let extractor = RepeatedExtractor::new(
            &Regex::new(r"#(\d+)").unwrap(),
            vec![GroupBinding::new(Field::PoNumber, 1)],
        );
        assert!(extractor.extract("no anchors at all").is_empty());
    }
}

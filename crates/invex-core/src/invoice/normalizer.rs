//! Field normalization: trimming and amount coercion.

use tracing::warn;

use super::rules::parse_amount;
use crate::models::record::{Amount, ExtractedRecord, FieldValue, NormalizedRecord};

/// Trim every field and coerce monetary fields to numbers.
///
/// Blank values become `None`. Amounts that do not parse are kept as
/// [`Amount::Unparsed`] instead of failing the record.
pub fn normalize(record: &ExtractedRecord) -> NormalizedRecord {
    let mut normalized = NormalizedRecord::default();

    for (field, value) in record.iter() {
        let value = value.map(str::trim).filter(|s| !s.is_empty()).map(|s| {
            if field.is_monetary() {
                let amount = parse_amount(s);
                if let Amount::Unparsed(ref raw) = amount {
                    warn!("Could not parse {} value {:?}", field.key(), raw);
                }
                FieldValue::Amount(amount)
            } else {
                FieldValue::Text(s.to_string())
            }
        });
        normalized.insert(field, value);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Field;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_normalize_trims_and_parses() {
        let record = ExtractedRecord::new()
            .with(Field::PoNumber, "  1001 ")
            .with(Field::InvoiceDate, "05 Jan 2024\n")
            .with(Field::TotalValueUsd, " 12,345.67");

        let normalized = normalize(&record);
        assert_eq!(normalized.text(Field::PoNumber), Some("1001"));
        assert_eq!(normalized.text(Field::InvoiceDate), Some("05 Jan 2024"));
        assert_eq!(
            normalized.total_usd(),
            Some(&Amount::Parsed(Decimal::from_str("12345.67").unwrap()))
        );
    }

    #[test]
    fn test_unparseable_amount_is_carried_through() {
        let record = ExtractedRecord::new()
            .with(Field::ReferencePo, "9001")
            .with(Field::TotalValueUsd, "1.000.00");

        let normalized = normalize(&record);
        assert_eq!(normalized.total_usd(), Some(&Amount::Unparsed("1.000.00".to_string())));
        assert_eq!(normalized.text(Field::ReferencePo), Some("9001"));
    }

    #[test]
    fn test_missing_and_blank_fields_stay_empty() {
        let mut record = ExtractedRecord::new();
        record.set(Field::InvoiceDate, None);
        record.set(Field::ReferencePo, Some("   ".to_string()));

        let normalized = normalize(&record);
        assert!(!normalized.has_any());
        assert_eq!(normalized.fields().count(), 2);
    }

    #[test]
    fn test_source_record_is_untouched() {
        let record = ExtractedRecord::new().with(Field::PoNumber, " 7 ");
        let _ = normalize(&record);
        assert_eq!(record.get(Field::PoNumber), Some(" 7 "));
    }
}

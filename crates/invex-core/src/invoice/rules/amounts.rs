//! Amount parsing and display formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::models::record::Amount;

/// Parse a US-formatted amount such as `"12,345.67"`.
///
/// Thousands separators and surrounding whitespace are removed. Text that
/// still is not a number comes back as [`Amount::Unparsed`] holding the
/// trimmed input.
pub fn parse_amount(s: &str) -> Amount {
    let trimmed = s.trim();
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();

    match Decimal::from_str(&cleaned) {
        Ok(value) => Amount::Parsed(value),
        Err(_) => Amount::Unparsed(trimmed.to_string()),
    }
}

/// Format an amount for display: thousands separators, two decimals.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => return s,
    };

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    format!("{}.{}", formatted, decimal_part)
}

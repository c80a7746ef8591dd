//! Declarative field rules and the patterns behind them.

pub mod amounts;
pub mod patterns;

pub use amounts::{format_amount, parse_amount};

use regex::{Captures, Regex};

use crate::models::record::Field;

/// One field-extraction rule: which capture group of which pattern feeds a field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Field the capture is stored under.
    pub field: Field,
    /// Pattern searched in the invoice text.
    pub pattern: Regex,
    /// Capture group holding the value.
    pub group: usize,
}

impl FieldRule {
    pub fn new(field: Field, pattern: &Regex) -> Self {
        Self {
            field,
            pattern: pattern.clone(),
            group: 1,
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    /// First match of the rule's pattern, if any.
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| capture(&caps, self.group))
    }
}

/// Binding of a capture group in a combined pattern to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupBinding {
    pub field: Field,
    pub group: usize,
}

impl GroupBinding {
    pub const fn new(field: Field, group: usize) -> Self {
        Self { field, group }
    }
}

/// Text of a capture group, `None` when the group did not take part in the match.
pub fn capture(caps: &Captures<'_>, group: usize) -> Option<String> {
    caps.get(group).map(|m| m.as_str().to_string())
}

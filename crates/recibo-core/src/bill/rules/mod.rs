//! Rule-based field extractors for CFE bills.

pub mod account;
pub mod dates;
pub mod period;
pub mod patterns;

pub use account::{AccountIdExtractor, extract_account_id};
pub use dates::{DueDateExtractor, extract_due_date, month_from_abbreviation, normalize_year};
pub use period::{BillingPeriodExtractor, extract_billing_period};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from normalized text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

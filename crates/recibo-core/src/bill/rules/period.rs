//! Billing period extraction.

use super::patterns::BILLING_PERIOD;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::record::BillingPeriod;

/// Billing period field extractor.
///
/// Keeps only the start and end month; days and years of the period are
/// discarded.
pub struct BillingPeriodExtractor;

impl BillingPeriodExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BillingPeriodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BillingPeriodExtractor {
    type Output = ExtractionMatch<BillingPeriod>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = BILLING_PERIOD.captures(text)?;
        let full_match = caps.get(0)?;

        let period: BillingPeriod = format!("{}-{}", &caps[1], &caps[2]).parse().ok()?;

        Some(
            ExtractionMatch::new(period, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Extract the billing period from normalized text.
pub fn extract_billing_period(text: &str) -> Option<BillingPeriod> {
    BillingPeriodExtractor::new().extract(text).map(|m| m.value)
}

//! Rule-based CFE bill parser: normalize, extract, validate.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::record::{BillingPeriod, ExtractedRecord};

use super::normalize_text;
use super::rules::{
    AccountIdExtractor, BillingPeriodExtractor, DueDateExtractor, ExtractionMatch, FieldExtractor,
};
use super::Result;

/// Result of bill extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Validated record.
    pub record: ExtractedRecord,
    /// Text snippets each field was taken from.
    pub matches: Vec<FieldMatch>,
    /// Non-fatal extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Where in the normalized text a field was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub field: &'static str,
    pub source: String,
    pub position: Option<(usize, usize)>,
}

impl FieldMatch {
    fn from_match<T>(field: &'static str, m: &ExtractionMatch<T>) -> Self {
        Self {
            field,
            source: m.source.clone(),
            position: m.position,
        }
    }
}

/// Trait for bill parsing.
pub trait BillParser {
    /// Parse a bill from the raw text of its first page.
    fn parse(&self, raw_text: Option<&str>) -> Result<ExtractionResult>;
}

/// Parser for the CFE bill template.
///
/// Account id and due date are required; a missing billing period is
/// replaced by the `UNK-UNK` sentinel and reported as a warning.
pub struct CfeBillParser {
    account: AccountIdExtractor,
    due_date: DueDateExtractor,
    period: BillingPeriodExtractor,
}

impl CfeBillParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            account: AccountIdExtractor::new(),
            due_date: DueDateExtractor::new(),
            period: BillingPeriodExtractor::new(),
        }
    }
}

impl Default for CfeBillParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BillParser for CfeBillParser {
    fn parse(&self, raw_text: Option<&str>) -> Result<ExtractionResult> {
        let start = Instant::now();
        let text = normalize_text(raw_text);
        let mut matches = Vec::with_capacity(3);
        let mut warnings = Vec::new();

        debug!("Parsing bill from {} characters of text", text.len());

        let account = self
            .account
            .extract(&text)
            .ok_or_else(|| ExtractionError::MissingField("account_id".to_string()))?;
        matches.push(FieldMatch::from_match("account_id", &account));

        let due = self
            .due_date
            .extract(&text)
            .ok_or_else(|| ExtractionError::MissingField("due_date".to_string()))?;
        matches.push(FieldMatch::from_match("due_date", &due));
        let due_date = due.value.to_date()?;

        let period = match self.period.extract(&text) {
            Some(m) => {
                matches.push(FieldMatch::from_match("billing_period", &m));
                m.value
            }
            None => {
                warn!("Billing period not found, using {}", BillingPeriod::UNKNOWN);
                warnings.push(format!(
                    "Could not detect billing period, using {}",
                    BillingPeriod::UNKNOWN
                ));
                BillingPeriod::unknown()
            }
        };

        let record = ExtractedRecord::new(due_date, &account.value, &period.to_string())?;

        debug!(
            "Extracted account={} due={} period={}",
            record.account_id(),
            record.due_date(),
            record.billing_period()
        );

        Ok(ExtractionResult {
            record,
            matches,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

//! Payment due date extraction.

use chrono::NaiveDate;

use super::patterns::DUE_DATE;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;

/// Spanish three-letter month abbreviations as printed on CFE bills.
pub const MONTHS: [(&str, u32); 12] = [
    ("ENE", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("ABR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AGO", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DIC", 12),
];

/// Day, month and year exactly as captured after the due date anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDate {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl RawDate {
    /// Normalize the captured parts into a calendar date.
    pub fn to_date(&self) -> Result<NaiveDate, ExtractionError> {
        parse_due_date(&self.day, &self.month, &self.year)
    }
}

/// Due date field extractor.
pub struct DueDateExtractor;

impl DueDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DueDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DueDateExtractor {
    type Output = ExtractionMatch<RawDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DUE_DATE.captures(text)?;
        let full_match = caps.get(0)?;

        let raw = RawDate {
            day: caps[1].to_string(),
            month: caps[2].to_string(),
            year: caps[3].to_string(),
        };

        Some(
            ExtractionMatch::new(raw, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Extract the payment due date from normalized text.
///
/// A missing anchor is reported as [`ExtractionError::MissingField`]; an
/// unknown month, a malformed year or an impossible day-of-month as
/// [`ExtractionError::Parse`].
pub fn extract_due_date(text: &str) -> Result<NaiveDate, ExtractionError> {
    DueDateExtractor::new()
        .extract(text)
        .ok_or_else(|| ExtractionError::MissingField("due_date".to_string()))?
        .value
        .to_date()
}

/// Build a date from captured day, month abbreviation and year strings.
pub fn parse_due_date(day: &str, month: &str, year: &str) -> Result<NaiveDate, ExtractionError> {
    let source = || format!("{} {} {}", day, month, year);

    let month_num = month_from_abbreviation(month)
        .ok_or_else(|| ExtractionError::parse("due_date", format!("unknown month '{}'", month)))?;
    let year_num = normalize_year(year)
        .ok_or_else(|| ExtractionError::parse("due_date", format!("invalid year '{}'", year)))?;
    let day_num: u32 = day
        .parse()
        .map_err(|_| ExtractionError::parse("due_date", source()))?;

    NaiveDate::from_ymd_opt(year_num, month_num, day_num)
        .ok_or_else(|| ExtractionError::parse("due_date", source()))
}

/// Map a Spanish month abbreviation (`ENE`..`DIC`) to its number.
///
/// Anything outside the table yields `None`; there is no fallback month.
pub fn month_from_abbreviation(abbr: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == abbr)
        .map(|(_, number)| *number)
}

/// `"25"` becomes 2025, `"2025"` stays 2025. Other lengths are rejected.
pub fn normalize_year(year: &str) -> Option<i32> {
    if !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: i32 = year.parse().ok()?;
    match year.len() {
        2 => Some(2000 + value),
        4 => Some(value),
        _ => None,
    }
}

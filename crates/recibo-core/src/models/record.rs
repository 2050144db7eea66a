//! Validated bill record and its canonical file name.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::bill::rules::patterns::{CANONICAL_FILE_NAME, PERIOD_TOKEN};
use crate::error::ExtractionError;

/// Issuer tag embedded in every canonical file name.
pub const ISSUER_TAG: &str = "CFE";

/// Minimum number of digits in a normalized account id.
pub const MIN_ACCOUNT_DIGITS: usize = 10;

/// Maximum number of digits in a normalized account id.
pub const MAX_ACCOUNT_DIGITS: usize = 20;

/// Start and end month of a billing cycle, e.g. `ABR-JUN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BillingPeriod {
    start: String,
    end: String,
}

impl BillingPeriod {
    /// Sentinel used when the period cannot be found in the bill.
    pub const UNKNOWN: &'static str = "UNK-UNK";

    /// The `UNK-UNK` sentinel period.
    pub fn unknown() -> Self {
        Self {
            start: "UNK".to_string(),
            end: "UNK".to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.start == "UNK" && self.end == "UNK"
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl FromStr for BillingPeriod {
    type Err = ExtractionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let caps = PERIOD_TOKEN.captures(token).ok_or_else(|| {
            ExtractionError::validation(
                "billing_period",
                format!("'{}' is not of the form MMM-MMM", token),
            )
        })?;

        Ok(Self {
            start: caps[1].to_string(),
            end: caps[2].to_string(),
        })
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for BillingPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fields extracted from one bill.
///
/// Only [`ExtractedRecord::new`] builds a record, so every instance holds a
/// digits-only account id of 10 to 20 digits, a well-formed period and a
/// real calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    due_date: NaiveDate,
    account_id: String,
    billing_period: BillingPeriod,
}

impl ExtractedRecord {
    /// Validate the raw field values and assemble a record.
    ///
    /// The account id is checked first, then the period token. The due date
    /// was already validated when the `NaiveDate` was built.
    pub fn new(
        due_date: NaiveDate,
        account_id: &str,
        billing_period: &str,
    ) -> Result<Self, ExtractionError> {
        let account_id = normalize_account_id(account_id);
        let digits = account_id.len();
        if !(MIN_ACCOUNT_DIGITS..=MAX_ACCOUNT_DIGITS).contains(&digits) {
            return Err(ExtractionError::validation(
                "account_id",
                format!(
                    "expected {} to {} digits, found {}",
                    MIN_ACCOUNT_DIGITS, MAX_ACCOUNT_DIGITS, digits
                ),
            ));
        }

        let billing_period = billing_period.parse::<BillingPeriod>()?;

        Ok(Self {
            due_date,
            account_id,
            billing_period,
        })
    }

    /// Recognize a file name that is already in canonical form.
    ///
    /// Returns `None` for anything [`ExtractedRecord::file_name`] could not
    /// have produced (wrong layout, impossible date, account id out of range).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let caps = CANONICAL_FILE_NAME.captures(file_name)?;

        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        let due_date = NaiveDate::from_ymd_opt(year, month, day)?;

        Self::new(due_date, &caps[4], &caps[5]).ok()
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn billing_period(&self) -> &BillingPeriod {
        &self.billing_period
    }

    /// Canonical file name: `YYYY_MM_DD_CFE_<account>_<MMM>-<MMM>.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "{:04}_{:02}_{:02}_{}_{}_{}.pdf",
            self.due_date.year(),
            self.due_date.month(),
            self.due_date.day(),
            ISSUER_TAG,
            self.account_id,
            self.billing_period
        )
    }
}

/// Strip every non-digit character from an account id.
pub fn normalize_account_id(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
